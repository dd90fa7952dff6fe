//! Background engine that applies a partner's remote task changes to the
//! local store.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::tasks::TaskRepositoryTrait;

use super::sync_model::{
    partner_tasks_channel, PartnerChangeFeed, RemoteChange, RemoteDeletedRecord, RemoteTaskRecord,
};

/// Lifecycle state of the engine's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Stopped,
    Starting,
    Subscribed,
}

struct EngineInner {
    state: SyncState,
    worker: Option<JoinHandle<()>>,
}

/// Per-partnership sync engine.
///
/// Holds at most one active subscription. Channel failures never escape the
/// engine: a failed subscribe leaves it Stopped, to be retried only by a
/// later explicit `start`. Real-time sync is an enhancement; the local cache
/// stays the source of truth either way.
pub struct PartnerSyncEngine {
    task_repository: Arc<dyn TaskRepositoryTrait>,
    feed: Arc<dyn PartnerChangeFeed>,
    inner: Mutex<EngineInner>,
}

impl PartnerSyncEngine {
    pub fn new(task_repository: Arc<dyn TaskRepositoryTrait>, feed: Arc<dyn PartnerChangeFeed>) -> Self {
        PartnerSyncEngine {
            task_repository,
            feed,
            inner: Mutex::new(EngineInner {
                state: SyncState::Stopped,
                worker: None,
            }),
        }
    }

    /// Subscribes to the partner's channel and starts consuming events.
    ///
    /// Any prior subscription is stopped first.
    pub async fn start(&self, user_id: &str, partner_id: &str) {
        let mut inner = self.inner.lock().await;
        if let Some(worker) = inner.worker.take() {
            worker.abort();
        }
        inner.state = SyncState::Starting;

        let channel = partner_tasks_channel(partner_id);
        debug!("user {user_id} subscribing to {channel}");
        let mut receiver = match self.feed.subscribe(&channel).await {
            Ok(receiver) => receiver,
            Err(err) => {
                warn!("subscribe to {channel} failed, sync stays off: {err}");
                inner.state = SyncState::Stopped;
                return;
            }
        };

        let repository = self.task_repository.clone();
        let partner_id = partner_id.to_string();
        inner.worker = Some(tokio::spawn(async move {
            while let Some(change) = receiver.recv().await {
                apply_change(repository.as_ref(), &partner_id, change).await;
            }
            debug!("change feed for partner {partner_id} closed");
        }));
        inner.state = SyncState::Subscribed;
    }

    /// Stops the consumption loop and releases the subscription.
    /// Safe to call when already stopped.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(worker) = inner.worker.take() {
            worker.abort();
        }
        inner.state = SyncState::Stopped;
    }

    pub async fn state(&self) -> SyncState {
        self.inner.lock().await.state
    }
}

/// Applies one remote event to the local task table.
///
/// Ownership is enforced here, client-side: the channel carries no
/// server-side row filter guarantee, so anything not owned by the expected
/// partner is discarded before it can touch the store. Unparseable payloads
/// are discarded the same way.
pub(crate) async fn apply_change(
    repository: &dyn TaskRepositoryTrait,
    partner_id: &str,
    change: RemoteChange,
) {
    match change {
        RemoteChange::Insert { record } | RemoteChange::Update { record } => {
            let parsed = match RemoteTaskRecord::parse(&record) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!("discarding unparseable task event: {err}");
                    return;
                }
            };
            if parsed.owner_id != partner_id {
                debug!("discarding task {} owned by {}", parsed.id, parsed.owner_id);
                return;
            }
            match parsed.into_task() {
                // last write wins: the row is overwritten whole, no field merge
                Ok(task) => {
                    if let Err(err) = repository.upsert_task(task).await {
                        warn!("failed to apply partner task upsert: {err}");
                    }
                }
                Err(err) => debug!("discarding task event with bad fields: {err}"),
            }
        }
        RemoteChange::Delete { old_record } => {
            let deleted: RemoteDeletedRecord = match serde_json::from_value(old_record) {
                Ok(deleted) => deleted,
                Err(err) => {
                    debug!("discarding unparseable delete event: {err}");
                    return;
                }
            };
            if deleted.owner_id != partner_id {
                debug!("discarding delete for task {} owned by {}", deleted.id, deleted.owner_id);
                return;
            }
            if let Err(err) = repository.delete_task(&deleted.id).await {
                warn!("failed to apply partner task delete: {err}");
            }
        }
    }
}
