//! Lenient parsing of stored date/time columns.
//!
//! Tables are plain CSV and may contain hand-edited or legacy values. Edit
//! views never fail on a malformed stored value: the caller supplies the
//! default that replaces it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::Timestamp;

/// Accepted stored datetime layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepted stored time-of-day layouts, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Stored form of a date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored form of a time-of-day column.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Parse a stored datetime, `None` if no accepted layout matches.
pub fn parse_datetime(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse a stored date. A full datetime is accepted and truncated to its date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(raw).map(|dt| dt.date()))
}

/// Parse a stored time of day. A full datetime is accepted and reduced to its time.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_datetime(raw).map(|dt| dt.time()))
}

/// Parse a stored datetime, substituting `default` when it is malformed.
pub fn datetime_or(raw: &str, default: Timestamp) -> Timestamp {
    parse_datetime(raw).unwrap_or(default)
}

/// Parse a stored date, substituting `default` when it is malformed.
pub fn date_or(raw: &str, default: NaiveDate) -> NaiveDate {
    parse_date(raw).unwrap_or(default)
}

/// Parse a stored time, substituting `default` when it is malformed.
pub fn time_or(raw: &str, default: NaiveTime) -> NaiveTime {
    parse_time(raw).unwrap_or(default)
}

/// Today's local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build a time of day from whole hours and minutes.
///
/// Only used with compile-time constants; out-of-range input yields midnight.
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Render a date in its stored form.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render a time of day in its stored form.
pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_datetime_with_and_without_fraction() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-05-01T09:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024-05-01T09:30:00.123456").map(|d| d.date()), Some(expected.date()));
        assert_eq!(parse_datetime("2024-05-01 09:30"), Some(expected));
    }

    #[test]
    fn malformed_datetime_falls_back_to_default() {
        let default = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_time(hm(9, 0));
        assert_eq!(datetime_or("not a date", default), default);
        assert_eq!(datetime_or("", default), default);
    }

    #[test]
    fn date_accepts_full_datetime() {
        assert_eq!(
            parse_date("2024-02-29T10:00:00"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn time_accepts_short_and_long_forms() {
        assert_eq!(parse_time("09:00"), Some(hm(9, 0)));
        assert_eq!(parse_time("18:45:00"), Some(hm(18, 45)));
        assert_eq!(parse_time("2024-01-01T07:15:00"), Some(hm(7, 15)));
        assert_eq!(time_or("25:99", hm(12, 0)), hm(12, 0));
    }

    #[test]
    fn stored_forms_round_trip_through_parse() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(parse_date(&format_date(&date)), Some(date));
        assert_eq!(parse_time(&format_time(&hm(23, 59))), Some(hm(23, 59)));
    }
}
