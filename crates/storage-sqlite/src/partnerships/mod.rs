//! SQLite storage implementation for partnerships, invites, and mirrored
//! partner goals.

mod model;
mod repository;

pub use model::{InviteDB, PartnerGoalDB, PartnershipDB};
pub use repository::PartnershipRepository;
