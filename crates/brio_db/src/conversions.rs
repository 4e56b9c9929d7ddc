//! Conversions between raw ERP column values and the shapes shown to callers.
//!
//! Dates and times are selected as text so every backend behind the `Any`
//! driver can decode them; they are normalized here to minute precision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// `$1, $2, ... $count` numbered from `start`.
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn truncate_chars(raw: &str, max: usize) -> String {
    raw.chars().take(max).collect()
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // Postgres renders timestamptz as `2025-03-01 10:30:00+00`
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Normalizes a timestamp to `YYYY-MM-DD HH:MM`.
///
/// Unparseable values are cut to their first 16 characters rather than dropped.
pub fn format_timestamp(raw: Option<&str>) -> Option<String> {
    let raw = non_blank(raw)?;
    Some(match parse_datetime(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => truncate_chars(raw, 16),
    })
}

/// Normalizes a date (or timestamp) to `YYYY-MM-DD`.
pub fn format_date(raw: Option<&str>) -> Option<String> {
    let raw = non_blank(raw)?;
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    Some(match parse_datetime(raw) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => truncate_chars(raw, 10),
    })
}

/// Normalizes a time (or timestamp) to `HH:MM`, dropping seconds.
pub fn format_time(raw: Option<&str>) -> Option<String> {
    let raw = non_blank(raw)?;
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.time()));
    Some(match parsed {
        Some(time) => time.format("%H:%M").to_string(),
        None => truncate_chars(raw, 5),
    })
}
