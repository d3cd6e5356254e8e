//! Calendar-day normalization.
//!
//! # Responsibility
//! - Collapse the date strings the app stores into calendar days.
//! - Provide the sort key used to order entries most-recent first.
//!
//! # Invariants
//! - The day written in the string is kept; timezone offsets are dropped,
//!   never applied.
//! - Save, import and backup validation all share `normalize_day`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DAY_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a stored date string to the calendar day it names.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, naive ISO-8601 date-times and
/// any other value that starts with a calendar date followed by a `T` or
/// space time part (`2024-05-01T10:00Z`, `2024-05-01T10:00:00+0000`).
/// Returns `None` when the value is not interpretable as a date.
pub fn normalize_day(value: &str) -> Option<NaiveDate> {
    parse_wall_clock(value)
        .map(|stamp| stamp.date())
        .or_else(|| leading_day(value))
}

/// Returns the `YYYY-MM-DD` key for same-day matching.
///
/// Unparseable values fall back to their trimmed raw text, so two identical
/// unparseable strings still match each other.
pub fn day_key(value: &str) -> String {
    match normalize_day(value) {
        Some(day) => format_day(day),
        None => value.trim().to_string(),
    }
}

/// Formats a day in the canonical `YYYY-MM-DD` shape.
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Sort key for descending date order.
///
/// Date-only values sort as midnight. `None` (unparseable) orders below every
/// parseable value, so those entries land at the end of a descending sort.
/// Values whose time part cannot be read sort as midnight of their day.
pub fn sort_key(value: &str) -> Option<NaiveDateTime> {
    parse_wall_clock(value)
        .or_else(|| leading_day(value).map(|day| day.and_time(NaiveTime::MIN)))
}

fn leading_day(value: &str) -> Option<NaiveDate> {
    let (day, rest) = NaiveDate::parse_and_remainder(value.trim(), DAY_FORMAT).ok()?;
    match rest.chars().next() {
        None | Some('T') | Some('t') | Some(' ') => Some(day),
        _ => None,
    }
}

fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
        return Some(day.and_time(NaiveTime::MIN));
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.naive_local());
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}
