//! Date classification
//!
//! Decides whether a cell value should be treated as a date. Used by
//! sort-type inference and by the cell formatter.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::Value;

/// Years at or below this are treated as implausible for date-shaped strings.
pub const MIN_PLAUSIBLE_YEAR: i32 = 1900;

/// True if `value` is a date object or a date-shaped string naming a real day.
///
/// Accepted string shapes: `MM-DD-YYYY`, `MM/DD/YYYY`, `YYYY-MM-DD` and
/// `YYYY/MM/DD`, each optionally followed by a time (`T` or space
/// separated, optional `Z` or `±HH:MM`). Numbers are never dates, even when
/// they look like timestamps.
///
/// ```
/// use datatable_core::{dates::is_date, Value};
///
/// assert!(is_date(&Value::from("01/31/2023")));
/// assert!(is_date(&Value::from("2023-01-31")));
/// assert!(!is_date(&Value::from("01-32-2023")));
/// assert!(!is_date(&Value::from(1_672_531_200)));
/// ```
pub fn is_date(value: &Value) -> bool {
    date_instant(value).is_some()
}

/// The instant a value denotes, if it classifies as a date.
pub fn date_instant(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Date(d) => Some(*d),
        Value::String(s) => parse_date(s),
        _ => None,
    }
}

/// Parse a date-shaped string. Offsets are normalized to UTC.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    let (date_part, time_part) = match input.find(['T', ' ']) {
        Some(idx) => (&input[..idx], Some(input[idx + 1..].trim())),
        None => (input, None),
    };

    let date = parse_day(date_part)?;
    match time_part {
        None => Some(date.and_time(NaiveTime::MIN)),
        Some(t) => {
            let (clock, offset_secs) = split_offset(t)?;
            let time = NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
                .ok()?;
            Some(date.and_time(time) - Duration::seconds(i64::from(offset_secs)))
        }
    }
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    let sep = if s.contains('-') { '-' } else { '/' };
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let (year, month, day) = match (parts[0].len(), parts[1].len(), parts[2].len()) {
        (4, 1..=2, 1..=2) => (parts[0], parts[1], parts[2]),
        (1..=2, 1..=2, 4) => (parts[2], parts[0], parts[1]),
        _ => return None,
    };
    let year: i32 = year.parse().ok()?;
    if year <= MIN_PLAUSIBLE_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn split_offset(t: &str) -> Option<(&str, i32)> {
    if let Some(clock) = t.strip_suffix('Z') {
        return Some((clock, 0));
    }
    let Some(idx) = t.rfind(['+', '-']) else {
        return Some((t, 0));
    };
    let (clock, offset) = t.split_at(idx);
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some((clock, sign * (hours * 3600 + minutes * 60)))
}
