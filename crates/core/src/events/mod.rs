//! Store events module.
//!
//! The local store is reactive: every write against a table notifies live
//! readers of that table. This module provides the table-scoped notifier the
//! storage layer publishes on and the `observe` helper services use to turn
//! a query into a live stream of snapshots.

mod notifier;
mod store_event;

pub use notifier::{observe, StoreNotifier};
pub use store_event::{StoreEvent, Table};
