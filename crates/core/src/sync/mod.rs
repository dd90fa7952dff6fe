//! Partner sync module - merges the remote change feed into the local store.

mod sync_engine;
mod sync_model;


pub use sync_engine::{PartnerSyncEngine, SyncState};
pub use sync_model::{
    partner_tasks_channel, PartnerChangeFeed, RemoteChange, RemoteDeletedRecord, RemoteTaskRecord,
};
