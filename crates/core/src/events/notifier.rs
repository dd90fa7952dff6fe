//! Table-scoped store notifier and the `observe` stream helper.

use futures::stream::{self, Stream};
use tokio::sync::broadcast;

use super::{StoreEvent, Table};
use crate::constants::STORE_NOTIFIER_CAPACITY;
use crate::errors::Result;

/// Publish-subscribe hub for store writes.
///
/// Storage repositories call [`StoreNotifier::notify`] after every successful
/// write; services subscribe and re-run their queries. `notify` is fast,
/// non-blocking, and best-effort: with no live subscribers the event is
/// simply dropped.
#[derive(Clone)]
pub struct StoreNotifier {
    tx: broadcast::Sender<StoreEvent>,
}

impl StoreNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(STORE_NOTIFIER_CAPACITY);
        Self { tx }
    }

    /// Announce that rows of `table` changed.
    pub fn notify(&self, table: Table) {
        // send only fails when there are no receivers, which is fine
        let _ = self.tx.send(StoreEvent::new(table));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl Default for StoreNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a query into a live stream of snapshots.
///
/// Emits the query result immediately, then re-runs it after every
/// notification for `table`. A lagged receiver also re-queries: snapshots are
/// full results, so missed intermediate events never lose data. The stream
/// ends when the notifier is dropped.
pub fn observe<T, F>(
    notifier: &StoreNotifier,
    table: Table,
    query: F,
) -> impl Stream<Item = Result<T>>
where
    F: Fn() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let rx = notifier.subscribe();
    stream::unfold((rx, query, true), move |(mut rx, query, initial)| async move {
        if initial {
            let snapshot = query();
            return Some((snapshot, (rx, query, false)));
        }
        loop {
            match rx.recv().await {
                Ok(event) if event.table == table => {
                    let snapshot = query();
                    return Some((snapshot, (rx, query, false)));
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    let snapshot = query();
                    return Some((snapshot, (rx, query, false)));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn test_observe_emits_initial_snapshot() {
        let notifier = StoreNotifier::new();
        let mut stream = Box::pin(observe(&notifier, Table::Tasks, || Ok(vec![1, 2, 3])));
        assert_eq!(stream.next().await.unwrap().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_observe_reemits_on_matching_table() {
        let data = Arc::new(Mutex::new(vec![1]));
        let notifier = StoreNotifier::new();
        let query_data = data.clone();
        let mut stream = Box::pin(observe(&notifier, Table::Goals, move || {
            Ok(query_data.lock().unwrap().clone())
        }));

        assert_eq!(stream.next().await.unwrap().unwrap(), vec![1]);

        data.lock().unwrap().push(2);
        notifier.notify(Table::Goals);
        assert_eq!(stream.next().await.unwrap().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_observe_ignores_other_tables() {
        let notifier = StoreNotifier::new();
        let mut stream = Box::pin(observe(&notifier, Table::Weeks, || Ok(0u32)));
        assert!(stream.next().await.is_some());

        // an event for a different table must not wake the stream
        notifier.notify(Table::Tasks);
        notifier.notify(Table::Weeks);
        assert!(stream.next().await.is_some());
    }

    #[tokio::test]
    async fn test_stream_ends_when_notifier_dropped() {
        let notifier = StoreNotifier::new();
        let mut stream = Box::pin(observe(&notifier, Table::Invites, || Ok(())));
        assert!(stream.next().await.is_some());
        drop(notifier);
        assert!(stream.next().await.is_none());
    }
}
