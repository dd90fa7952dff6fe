//! Partnerships module - pairing records, invites, mirrored partner goals,
//! and the invite handshake flow.

mod invites_service;
mod partnerships_errors;
mod partnerships_model;
mod partnerships_traits;


#[cfg(test)]
mod partnerships_model_tests;

pub use invites_service::InviteService;
pub use partnerships_errors::{classify_remote_error, PartnerError};
pub use partnerships_model::{
    Invite, InviteStatus, Partnership, PartnershipStatus, PartnerGoal, RemoteInvite,
    RemotePartnership,
};
pub use partnerships_traits::{
    InviteServiceTrait, PartnerRemoteApi, PartnershipRepositoryTrait,
};
