//! Tandem Core - Domain entities, services, and traits.
//!
//! This crate contains the offline-first business logic for Tandem.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate, plus remote traits
//! implemented by the `connect` crate.

pub mod calendar;
pub mod constants;
pub mod errors;
pub mod events;
pub mod goals;
pub mod partnerships;
pub mod sync;
pub mod tasks;
pub mod weeks;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
