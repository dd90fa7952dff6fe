//! Task domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Lifecycle status of a task.
///
/// Any transition between statuses is permitted at this layer; policy
/// enforcement belongs to a higher layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    PendingAcceptance,
    Completed,
    Tried,
    Skipped,
    Declined,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::PendingAcceptance => "PENDING_ACCEPTANCE",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Tried => "TRIED",
            TaskStatus::Skipped => "SKIPPED",
            TaskStatus::Declined => "DECLINED",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "PENDING_ACCEPTANCE" => Ok(TaskStatus::PendingAcceptance),
            "COMPLETED" => Ok(TaskStatus::Completed),
            "TRIED" => Ok(TaskStatus::Tried),
            "SKIPPED" => Ok(TaskStatus::Skipped),
            "DECLINED" => Ok(TaskStatus::Declined),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown task status '{other}'"
            )))),
        }
    }
}

/// Who a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerType {
    #[serde(rename = "SELF")]
    Own,
    #[serde(rename = "PARTNER")]
    Partner,
    #[serde(rename = "SHARED")]
    Shared,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::Own => "SELF",
            OwnerType::Partner => "PARTNER",
            OwnerType::Shared => "SHARED",
        }
    }
}

impl std::str::FromStr for OwnerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SELF" => Ok(OwnerType::Own),
            "PARTNER" => Ok(OwnerType::Partner),
            "SHARED" => Ok(OwnerType::Shared),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown owner type '{other}'"
            )))),
        }
    }
}

/// Domain model representing a single actionable commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub week_id: String,
    pub status: TaskStatus,
    pub created_by: String,
    /// Parent task when this task is a subtask.
    pub parent_task_id: Option<String>,
    pub repeat_target: Option<i32>,
    pub repeat_completed: i32,
    pub linked_goal_id: Option<String>,
    pub review_note: Option<String>,
    /// Week this task was rolled over from, provenance only.
    pub rolled_from_week_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<i32>,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Input model for creating a new task.
///
/// Id and timestamps are assigned by the service at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub notes: Option<String>,
    pub owner_id: String,
    pub owner_type: OwnerType,
    pub week_id: String,
    /// Defaults to PENDING when not set by the caller.
    pub status: Option<TaskStatus>,
    pub created_by: String,
    pub parent_task_id: Option<String>,
    pub repeat_target: Option<i32>,
    pub linked_goal_id: Option<String>,
    pub rolled_from_week_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<i32>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Content update for an existing task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: String,
    pub notes: Option<String>,
    pub status: TaskStatus,
}
