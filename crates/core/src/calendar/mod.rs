//! Week calendar module - ISO-8601 week arithmetic.

mod week_calendar;

#[cfg(test)]
mod week_calendar_tests;

pub use week_calendar::{
    add_weeks, compare_week_ids, current_week_id, format_week_id, last_week_of_year,
    next_week_id, parse_week_id, previous_week_id, week_boundaries, CalendarError,
};
