//! SQLite storage implementation for Tandem.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in `tandem-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This is the only crate in the application where Diesel dependencies
//! exist. Everything else is database-agnostic and works with traits.
//!
//! Writes are serialized through a single writer actor holding a dedicated
//! connection, so no two writers can interleave on the same row. Every
//! successful write notifies the store notifier, which re-emits to every
//! open reactive query stream for the affected table.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;
pub mod partnerships;
pub mod tasks;
pub mod weeks;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from tandem-core for convenience
pub use tandem_core::errors::{DatabaseError, Error, Result};
