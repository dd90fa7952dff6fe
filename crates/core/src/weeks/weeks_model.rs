//! Week domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar week scoped to one user, keyed by `(id, user_id)`.
///
/// Invariants: `start_date` is a Monday and `end_date` is exactly six days
/// later. Enforced by `WeekService` before any write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// ISO week id, `YYYY-Www`.
    pub id: String,
    pub user_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Review rating, 1 through 5.
    pub overall_rating: Option<i32>,
    pub review_note: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub planning_completed_at: Option<DateTime<Utc>>,
}

impl Week {
    pub fn is_reviewed(&self) -> bool {
        self.reviewed_at.is_some()
    }

    pub fn is_planned(&self) -> bool {
        self.planning_completed_at.is_some()
    }
}
