//! Display formatting for server timestamps.
//!
//! Timestamps are only rendered, never used for logic. Both formats follow
//! the en-GB convention: `dd/mm/yyyy` and `dd/mm/yyyy, hh:mm am`.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const SHORT_DATE: &str = "%d/%m/%Y";
const LONG_DATE_TIME: &str = "%d/%m/%Y, %I:%M %P";

/// Parse a server timestamp into `tz`.
///
/// Accepts RFC 3339, a Postgres-style `YYYY-MM-DD HH:MM:SS+00`, a naive
/// date-time (taken as local to `tz`), or a bare date.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(tz));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    let midnight = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight).earliest()
}

/// Short date in the local time zone. Unparseable input is returned as-is.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// Long date-time in the local time zone. Unparseable input is returned as-is.
pub fn format_date_time(raw: &str) -> String {
    format_date_time_in(raw, &Local)
}

pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format(SHORT_DATE).to_string(),
        None => raw.to_string(),
    }
}

pub fn format_date_time_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    match parse_timestamp(raw, tz) {
        Some(dt) => dt.format(LONG_DATE_TIME).to_string(),
        None => raw.to_string(),
    }
}
