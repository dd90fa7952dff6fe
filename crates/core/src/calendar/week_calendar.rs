//! ISO-8601 week identifier arithmetic.
//!
//! Every entity in the system keys off `YYYY-Www` week identifiers. This
//! module is the single source of truth for producing, parsing, and walking
//! them. Pure functions, no I/O.

use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use regex::Regex;
use thiserror::Error;

/// Errors produced by week-id parsing and boundary math.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The string does not match `YYYY-Www` or names a week the year
    /// does not have.
    #[error("invalid week id '{0}': expected YYYY-Www with week 01..={1}")]
    InvalidWeekId(String, u32),
}

fn week_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-W\d{2}$").expect("static week-id pattern"))
}

/// Formats a (year, week) pair as a `YYYY-Www` identifier.
pub fn format_week_id(year: i32, week: u32) -> String {
    format!("{:04}-W{:02}", year, week)
}

/// Parses a `YYYY-Www` identifier into `(year, week)`.
///
/// The week number must fall in `1..=last_week_of_year(year)`.
pub fn parse_week_id(week_id: &str) -> Result<(i32, u32), CalendarError> {
    let invalid = || CalendarError::InvalidWeekId(week_id.to_string(), 53);
    if !week_id_regex().is_match(week_id) {
        return Err(invalid());
    }
    let year: i32 = week_id[0..4].parse().map_err(|_| invalid())?;
    let week: u32 = week_id[6..8].parse().map_err(|_| invalid())?;
    let last = last_week_of_year(year);
    if week == 0 || week > last {
        return Err(CalendarError::InvalidWeekId(week_id.to_string(), last));
    }
    Ok((year, week))
}

/// Returns the week id containing `now`, as observed in `tz`.
///
/// The timezone matters near year boundaries: the same instant can fall in
/// different ISO weeks depending on the local date.
pub fn current_week_id(now: DateTime<Utc>, tz: Tz) -> String {
    let local_date = now.with_timezone(&tz).date_naive();
    let iso = local_date.iso_week();
    format_week_id(iso.year(), iso.week())
}

/// Returns `(start, end)` dates for a week id: the Monday it starts on and
/// the Sunday exactly 6 days later.
pub fn week_boundaries(week_id: &str) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    let (year, week) = parse_week_id(week_id)?;
    let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or_else(|| CalendarError::InvalidWeekId(week_id.to_string(), last_week_of_year(year)))?;
    Ok((start, start + Duration::days(6)))
}

/// Number of ISO weeks in `year`: 53 iff Dec-31 falls on Thursday, or the
/// year is a leap year and Dec-31 falls on Friday; otherwise 52.
pub fn last_week_of_year(year: i32) -> u32 {
    let dec31 = match NaiveDate::from_ymd_opt(year, 12, 31) {
        Some(d) => d,
        None => return 52,
    };
    match dec31.weekday() {
        Weekday::Thu => 53,
        Weekday::Fri if dec31.leap_year() => 53,
        _ => 52,
    }
}

/// The week immediately before `week_id`.
///
/// Decrementing week 1 crosses into the previous year and recomputes that
/// year's last week number; it is not a hardcoded 52.
pub fn previous_week_id(week_id: &str) -> Result<String, CalendarError> {
    let (year, week) = parse_week_id(week_id)?;
    if week > 1 {
        Ok(format_week_id(year, week - 1))
    } else {
        Ok(format_week_id(year - 1, last_week_of_year(year - 1)))
    }
}

/// The week immediately after `week_id`.
pub fn next_week_id(week_id: &str) -> Result<String, CalendarError> {
    let (year, week) = parse_week_id(week_id)?;
    if week < last_week_of_year(year) {
        Ok(format_week_id(year, week + 1))
    } else {
        Ok(format_week_id(year + 1, 1))
    }
}

/// The week id `n` weeks after `week_id` (negative `n` walks backwards).
pub fn add_weeks(week_id: &str, n: i64) -> Result<String, CalendarError> {
    let (start, _) = week_boundaries(week_id)?;
    let shifted = start + Duration::weeks(n);
    let iso = shifted.iso_week();
    Ok(format_week_id(iso.year(), iso.week()))
}

/// Chronological ordering of two week ids.
pub fn compare_week_ids(a: &str, b: &str) -> Result<Ordering, CalendarError> {
    let a = parse_week_id(a)?;
    let b = parse_week_id(b)?;
    Ok(a.cmp(&b))
}
