//! Store event types.

use serde::{Deserialize, Serialize};

/// Tables of the local store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Tasks,
    Weeks,
    Goals,
    GoalProgress,
    Partnerships,
    Invites,
    PartnerGoals,
}

/// Fact that rows of a table changed.
///
/// Events carry no row data: subscribers re-run their query and receive a
/// fresh full snapshot, so a skipped or coalesced event is always safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreEvent {
    pub table: Table,
}

impl StoreEvent {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}
