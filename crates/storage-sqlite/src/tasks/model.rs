//! Database models for tasks.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tandem_core::tasks::Task;
use tandem_core::{Error, Result};

use crate::utils::{
    date_to_string, datetime_to_millis, labels_from_json, labels_to_json, millis_to_datetime,
    parse_date,
};

/// Database model for tasks.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct TaskDB {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub owner_id: String,
    pub owner_type: String,
    pub week_id: String,
    pub status: String,
    pub created_by: String,
    pub parent_task_id: Option<String>,
    pub repeat_target: Option<i32>,
    pub repeat_completed: i32,
    pub linked_goal_id: Option<String>,
    pub review_note: Option<String>,
    pub rolled_from_week_id: Option<String>,
    pub scheduled_date: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<i32>,
    pub labels: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Task> for TaskDB {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            notes: task.notes,
            owner_id: task.owner_id,
            owner_type: task.owner_type.as_str().to_string(),
            week_id: task.week_id,
            status: task.status.as_str().to_string(),
            created_by: task.created_by,
            parent_task_id: task.parent_task_id,
            repeat_target: task.repeat_target,
            repeat_completed: task.repeat_completed,
            linked_goal_id: task.linked_goal_id,
            review_note: task.review_note,
            rolled_from_week_id: task.rolled_from_week_id,
            scheduled_date: task.scheduled_date.map(date_to_string),
            deadline: task.deadline.map(date_to_string),
            priority: task.priority,
            labels: labels_to_json(&task.labels),
            created_at: datetime_to_millis(task.created_at),
            updated_at: datetime_to_millis(task.updated_at),
        }
    }
}

impl TryFrom<TaskDB> for Task {
    type Error = Error;

    fn try_from(db: TaskDB) -> Result<Self> {
        Ok(Task {
            owner_type: db.owner_type.parse()?,
            status: db.status.parse()?,
            scheduled_date: db.scheduled_date.as_deref().map(parse_date).transpose()?,
            deadline: db.deadline.as_deref().map(parse_date).transpose()?,
            labels: labels_from_json(db.labels.as_deref()),
            created_at: millis_to_datetime(db.created_at)?,
            updated_at: millis_to_datetime(db.updated_at)?,
            id: db.id,
            title: db.title,
            notes: db.notes,
            owner_id: db.owner_id,
            week_id: db.week_id,
            created_by: db.created_by,
            parent_task_id: db.parent_task_id,
            repeat_target: db.repeat_target,
            repeat_completed: db.repeat_completed,
            linked_goal_id: db.linked_goal_id,
            review_note: db.review_note,
            rolled_from_week_id: db.rolled_from_week_id,
            priority: db.priority,
        })
    }
}
