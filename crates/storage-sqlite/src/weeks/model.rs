//! Database models for weeks.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tandem_core::weeks::Week;
use tandem_core::{Error, Result};

use crate::utils::{date_to_string, datetime_to_millis, millis_to_datetime, parse_date};

/// Database model for weeks. Composite key `(id, user_id)`.
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
#[diesel(table_name = crate::schema::weeks)]
#[diesel(primary_key(id, user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct WeekDB {
    pub id: String,
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub overall_rating: Option<i32>,
    pub review_note: Option<String>,
    pub reviewed_at: Option<i64>,
    pub planning_completed_at: Option<i64>,
}

impl From<Week> for WeekDB {
    fn from(week: Week) -> Self {
        Self {
            id: week.id,
            user_id: week.user_id,
            start_date: date_to_string(week.start_date),
            end_date: date_to_string(week.end_date),
            overall_rating: week.overall_rating,
            review_note: week.review_note,
            reviewed_at: week.reviewed_at.map(datetime_to_millis),
            planning_completed_at: week.planning_completed_at.map(datetime_to_millis),
        }
    }
}

impl TryFrom<WeekDB> for Week {
    type Error = Error;

    fn try_from(db: WeekDB) -> Result<Self> {
        Ok(Week {
            start_date: parse_date(&db.start_date)?,
            end_date: parse_date(&db.end_date)?,
            reviewed_at: db.reviewed_at.map(millis_to_datetime).transpose()?,
            planning_completed_at: db.planning_completed_at.map(millis_to_datetime).transpose()?,
            id: db.id,
            user_id: db.user_id,
            overall_rating: db.overall_rating,
            review_note: db.review_note,
        })
    }
}
