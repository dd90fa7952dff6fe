//! Column conversion helpers.
//!
//! Timestamps are stored as millisecond epoch integers, dates as ISO-8601
//! strings, enums as strings, and labels as a JSON array string.

use chrono::{DateTime, NaiveDate, Utc};

use tandem_core::errors::{Error, Result, ValidationError};

pub fn datetime_to_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

pub fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        Error::Validation(ValidationError::OutOfRange(format!(
            "timestamp {millis} out of range"
        )))
    })
}

pub fn date_to_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?)
}

pub fn labels_to_json(labels: &[String]) -> Option<String> {
    if labels.is_empty() {
        None
    } else {
        serde_json::to_string(labels).ok()
    }
}

pub fn labels_from_json(value: Option<&str>) -> Vec<String> {
    value
        .and_then(|v| serde_json::from_str(v).ok())
        .unwrap_or_default()
}
