//! Remote change-feed types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::constants::PARTNER_TASKS_CHANNEL_PREFIX;
use crate::errors::Result;
use crate::tasks::Task;

/// Channel name for a partnership's task feed.
pub fn partner_tasks_channel(partner_id: &str) -> String {
    format!("{PARTNER_TASKS_CHANNEL_PREFIX}{partner_id}")
}

/// One event from the remote realtime channel.
///
/// Payloads are flat string-keyed records; they stay untyped until the
/// engine decides whether the event is worth parsing at all.
#[derive(Debug, Clone)]
pub enum RemoteChange {
    Insert { record: Value },
    Update { record: Value },
    Delete { old_record: Value },
}

/// Typed view of a remote task row.
///
/// Timestamps arrive as ISO-8601 strings; fields the feed does not carry
/// (notes, schedule, labels) default to empty on the local row.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTaskRecord {
    pub id: String,
    pub title: String,
    pub owner_id: String,
    pub owner_type: String,
    pub week_id: String,
    pub status: String,
    pub created_by: String,
    pub repeat_target: Option<i32>,
    pub repeat_completed: Option<i32>,
    pub linked_goal_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RemoteTaskRecord {
    pub fn parse(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn into_task(self) -> Result<Task> {
        let owner_type = self.owner_type.parse()?;
        let status = self.status.parse()?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)?.with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)?.with_timezone(&Utc);
        Ok(Task {
            id: self.id,
            title: self.title,
            notes: None,
            owner_id: self.owner_id,
            owner_type,
            week_id: self.week_id,
            status,
            created_by: self.created_by,
            parent_task_id: None,
            repeat_target: self.repeat_target,
            repeat_completed: self.repeat_completed.unwrap_or(0),
            linked_goal_id: self.linked_goal_id,
            review_note: None,
            rolled_from_week_id: None,
            scheduled_date: None,
            deadline: None,
            priority: None,
            labels: Vec::new(),
            created_at,
            updated_at,
        })
    }
}

/// Minimal view of a deleted row's "old record" payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDeletedRecord {
    pub id: String,
    pub owner_id: String,
}

/// Source of remote change events for one channel.
///
/// Implementations hand back the receiving half of a channel they keep
/// feeding; dropping the receiver releases the subscription.
#[async_trait]
pub trait PartnerChangeFeed: Send + Sync {
    async fn subscribe(&self, channel: &str) -> Result<mpsc::Receiver<RemoteChange>>;
}
