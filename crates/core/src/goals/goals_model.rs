//! Goal domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Kind of goal, with the payload its target computation needs.
///
/// Matched exhaustively wherever target or display logic depends on the
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    /// Do something N times every week.
    #[serde(rename_all = "camelCase")]
    WeeklyHabit { target_per_week: i32 },
    /// Do something once every week.
    RecurringTask,
    /// Accumulate toward a total.
    #[serde(rename_all = "camelCase")]
    TargetAmount { target_total: i32 },
}

impl GoalType {
    /// The progress value that counts as "target met" for this type.
    pub fn target_value(&self) -> i32 {
        match self {
            GoalType::WeeklyHabit { target_per_week } => *target_per_week,
            GoalType::RecurringTask => 1,
            GoalType::TargetAmount { target_total } => *target_total,
        }
    }

    /// Storage tag for the variant.
    pub fn kind_str(&self) -> &'static str {
        match self {
            GoalType::WeeklyHabit { .. } => "WEEKLY_HABIT",
            GoalType::RecurringTask => "RECURRING_TASK",
            GoalType::TargetAmount { .. } => "TARGET_AMOUNT",
        }
    }

    /// Rebuilds the variant from its storage tag and target column.
    pub fn from_parts(kind: &str, target: Option<i32>) -> Result<Self, Error> {
        match kind {
            "WEEKLY_HABIT" => Ok(GoalType::WeeklyHabit {
                target_per_week: target.unwrap_or(1),
            }),
            "RECURRING_TASK" => Ok(GoalType::RecurringTask),
            "TARGET_AMOUNT" => Ok(GoalType::TargetAmount {
                target_total: target.unwrap_or(0),
            }),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown goal type '{other}'"
            )))),
        }
    }

    /// The target column value for storage; `None` for types with an
    /// implicit target.
    pub fn target_column(&self) -> Option<i32> {
        match self {
            GoalType::WeeklyHabit { target_per_week } => Some(*target_per_week),
            GoalType::RecurringTask => None,
            GoalType::TargetAmount { target_total } => Some(*target_total),
        }
    }
}

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Expired,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "ACTIVE",
            GoalStatus::Completed => "COMPLETED",
            GoalStatus::Expired => "EXPIRED",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(GoalStatus::Active),
            "COMPLETED" => Ok(GoalStatus::Completed),
            "EXPIRED" => Ok(GoalStatus::Expired),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown goal status '{other}'"
            )))),
        }
    }
}

/// Domain model representing a multi-week target owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(flatten)]
    pub goal_type: GoalType,
    pub duration_weeks: Option<i32>,
    pub start_week_id: String,
    pub owner_id: String,
    pub current_progress: i32,
    /// The week whose progress `current_progress` represents.
    pub current_week_id: String,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn has_met_target(&self) -> bool {
        self.current_progress >= self.goal_type.target_value()
    }
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub icon: String,
    #[serde(flatten)]
    pub goal_type: GoalType,
    pub duration_weeks: Option<i32>,
    pub start_week_id: String,
    pub owner_id: String,
}

/// Immutable historical snapshot of one goal-week. Append-only: inserted
/// during weekly-reset processing and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: String,
    pub goal_id: String,
    pub week_id: String,
    pub progress_value: i32,
    pub target_value: i32,
    pub created_at: DateTime<Utc>,
}
