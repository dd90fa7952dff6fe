//! SQLite storage implementation for weeks.

mod model;
mod repository;

pub use model::WeekDB;
pub use repository::WeekRepository;
