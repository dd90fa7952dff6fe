//! Weeks module - domain models, services, and traits.

mod weeks_model;
mod weeks_service;
mod weeks_traits;

#[cfg(test)]
mod weeks_service_tests;

pub use weeks_model::Week;
pub use weeks_service::WeekService;
pub use weeks_traits::{WeekRepositoryTrait, WeekServiceTrait};
