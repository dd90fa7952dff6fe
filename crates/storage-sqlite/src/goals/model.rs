//! Database models for goals.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tandem_core::goals::{Goal, GoalProgress, GoalType};
use tandem_core::{Error, Result};

use crate::utils::{datetime_to_millis, millis_to_datetime};

/// Database model for goals.
///
/// The tagged `GoalType` union is flattened into a `goal_type` tag column
/// and a nullable `target_value` payload column.
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub goal_type: String,
    pub target_value: Option<i32>,
    pub duration_weeks: Option<i32>,
    pub start_week_id: String,
    pub owner_id: String,
    pub current_progress: i32,
    pub current_week_id: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Goal> for GoalDB {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            name: goal.name,
            icon: goal.icon,
            goal_type: goal.goal_type.kind_str().to_string(),
            target_value: goal.goal_type.target_column(),
            duration_weeks: goal.duration_weeks,
            start_week_id: goal.start_week_id,
            owner_id: goal.owner_id,
            current_progress: goal.current_progress,
            current_week_id: goal.current_week_id,
            status: goal.status.as_str().to_string(),
            created_at: datetime_to_millis(goal.created_at),
            updated_at: datetime_to_millis(goal.updated_at),
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = Error;

    fn try_from(db: GoalDB) -> Result<Self> {
        Ok(Goal {
            goal_type: GoalType::from_parts(&db.goal_type, db.target_value)?,
            status: db.status.parse()?,
            created_at: millis_to_datetime(db.created_at)?,
            updated_at: millis_to_datetime(db.updated_at)?,
            id: db.id,
            name: db.name,
            icon: db.icon,
            duration_weeks: db.duration_weeks,
            start_week_id: db.start_week_id,
            owner_id: db.owner_id,
            current_progress: db.current_progress,
            current_week_id: db.current_week_id,
        })
    }
}

/// Database model for goal-progress snapshots. Append-only.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goal_progress)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressDB {
    pub id: String,
    pub goal_id: String,
    pub week_id: String,
    pub progress_value: i32,
    pub target_value: i32,
    pub created_at: i64,
}

impl From<GoalProgress> for GoalProgressDB {
    fn from(progress: GoalProgress) -> Self {
        Self {
            id: progress.id,
            goal_id: progress.goal_id,
            week_id: progress.week_id,
            progress_value: progress.progress_value,
            target_value: progress.target_value,
            created_at: datetime_to_millis(progress.created_at),
        }
    }
}

impl TryFrom<GoalProgressDB> for GoalProgress {
    type Error = Error;

    fn try_from(db: GoalProgressDB) -> Result<Self> {
        Ok(GoalProgress {
            created_at: millis_to_datetime(db.created_at)?,
            id: db.id,
            goal_id: db.goal_id,
            week_id: db.week_id,
            progress_value: db.progress_value,
            target_value: db.target_value,
        })
    }
}
