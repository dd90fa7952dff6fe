//! Tests for ISO-8601 week arithmetic.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use proptest::prelude::*;

use super::week_calendar::*;

#[test]
fn test_parse_valid_week_id() {
    assert_eq!(parse_week_id("2026-W01").unwrap(), (2026, 1));
    assert_eq!(parse_week_id("2026-W53").unwrap(), (2026, 53));
    assert_eq!(parse_week_id("1999-W52").unwrap(), (1999, 52));
}

#[test]
fn test_parse_rejects_malformed_ids() {
    for bad in ["2026-1", "2026-W1", "2026W01", "26-W01", "2026-W001", "abcd-Wxy", ""] {
        assert!(parse_week_id(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn test_parse_rejects_out_of_range_weeks() {
    assert!(parse_week_id("2026-W00").is_err());
    assert!(parse_week_id("2026-W54").is_err());
    // 2025 has only 52 ISO weeks
    assert!(parse_week_id("2025-W53").is_err());
}

#[test]
fn test_boundaries_first_week_of_2026() {
    // 2026-W01 spans 2025-12-29 (Monday) through 2026-01-04 (Sunday)
    let (start, end) = week_boundaries("2026-W01").unwrap();
    assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
    assert_eq!(start.weekday(), Weekday::Mon);
    assert_eq!(end.weekday(), Weekday::Sun);
}

#[test]
fn test_last_week_of_year_known_years() {
    // 53-week years: Dec-31 on Thursday, or leap year with Dec-31 on Friday
    assert_eq!(last_week_of_year(2015), 53);
    assert_eq!(last_week_of_year(2020), 53);
    assert_eq!(last_week_of_year(2026), 53);
    assert_eq!(last_week_of_year(2004), 53);
    assert_eq!(last_week_of_year(2024), 52);
    assert_eq!(last_week_of_year(2025), 52);
    assert_eq!(last_week_of_year(2023), 52);
}

#[test]
fn test_previous_week_crosses_year_boundary() {
    assert_eq!(previous_week_id("2026-W02").unwrap(), "2026-W01");
    // 2025 has 52 weeks
    assert_eq!(previous_week_id("2026-W01").unwrap(), "2025-W52");
    // 2020 has 53 weeks; decrementing 2021-W01 must not hardcode 52
    assert_eq!(previous_week_id("2021-W01").unwrap(), "2020-W53");
}

#[test]
fn test_next_week_crosses_year_boundary() {
    assert_eq!(next_week_id("2025-W52").unwrap(), "2026-W01");
    assert_eq!(next_week_id("2020-W53").unwrap(), "2021-W01");
    assert_eq!(next_week_id("2026-W01").unwrap(), "2026-W02");
}

#[test]
fn test_add_weeks_walks_forward_and_back() {
    assert_eq!(add_weeks("2026-W01", 0).unwrap(), "2026-W01");
    assert_eq!(add_weeks("2026-W01", 4).unwrap(), "2026-W05");
    assert_eq!(add_weeks("2026-W01", -1).unwrap(), "2025-W52");
    assert_eq!(add_weeks("2020-W52", 1).unwrap(), "2020-W53");
}

#[test]
fn test_compare_week_ids() {
    assert_eq!(compare_week_ids("2025-W52", "2026-W01").unwrap(), Ordering::Less);
    assert_eq!(compare_week_ids("2026-W10", "2026-W02").unwrap(), Ordering::Greater);
    assert_eq!(compare_week_ids("2026-W07", "2026-W07").unwrap(), Ordering::Equal);
}

#[test]
fn test_current_week_id_depends_on_timezone() {
    // 2025-12-28T23:00Z is Sunday evening in New York but already Monday
    // 2025-12-29 in Auckland, which belongs to 2026-W01.
    let instant = Utc.with_ymd_and_hms(2025, 12, 28, 23, 0, 0).unwrap();
    let ny: Tz = "America/New_York".parse().unwrap();
    let akl: Tz = "Pacific/Auckland".parse().unwrap();
    assert_eq!(current_week_id(instant, ny), "2025-W52");
    assert_eq!(current_week_id(instant, akl), "2026-W01");
}

#[test]
fn test_current_week_id_new_year_belongs_to_w01() {
    let instant = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let utc_tz: Tz = "UTC".parse().unwrap();
    assert_eq!(current_week_id(instant, utc_tz), "2026-W01");
}

proptest! {
    #[test]
    fn prop_boundaries_are_monday_through_sunday(year in 1900i32..2200, week in 1u32..=52) {
        let week_id = format_week_id(year, week);
        let (start, end) = week_boundaries(&week_id).unwrap();
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert_eq!(end.weekday(), Weekday::Sun);
        prop_assert_eq!(end - start, chrono::Duration::days(6));
    }

    #[test]
    fn prop_last_week_matches_dec28_iso_week(year in 1900i32..2200) {
        // Dec-28 always falls in the last ISO week of its year.
        let last = last_week_of_year(year);
        prop_assert!(last == 52 || last == 53);
        let dec28 = NaiveDate::from_ymd_opt(year, 12, 28).unwrap();
        prop_assert_eq!(dec28.iso_week().week(), last);
    }

    #[test]
    fn prop_previous_then_next_round_trips(year in 1900i32..2200, week in 1u32..=52) {
        let week_id = format_week_id(year, week);
        let prev = previous_week_id(&week_id).unwrap();
        prop_assert_eq!(next_week_id(&prev).unwrap(), week_id);
    }

    #[test]
    fn prop_current_week_id_round_trips_to_monday(secs in 0i64..4_102_444_800) {
        let instant = Utc.timestamp_opt(secs, 0).unwrap();
        let utc_tz: Tz = "UTC".parse().unwrap();
        let week_id = current_week_id(instant, utc_tz);
        let (start, _) = week_boundaries(&week_id).unwrap();
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        // the instant's own date falls inside the returned week
        let date = instant.date_naive();
        prop_assert!(start <= date && date <= start + chrono::Duration::days(6));
    }
}
