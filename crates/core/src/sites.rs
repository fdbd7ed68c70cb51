//! Shooting-site constants and validation.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CoreError;
use crate::timestamps;
use crate::types::{format_timestamp, Timestamp};
use crate::validation::{require_non_empty, validate_choice};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_NOT_SCOUTED: &str = "not_scouted";
pub const STATUS_SCOUTED: &str = "scouted";
pub const STATUS_SHOT: &str = "shot";
pub const STATUS_NEEDS_RESHOOT: &str = "needs_reshoot";

/// Site lifecycle states, in form order. The first entry is the default.
pub const SITE_STATUSES: &[&str] = &[
    STATUS_NOT_SCOUTED,
    STATUS_SCOUTED,
    STATUS_SHOT,
    STATUS_NEEDS_RESHOOT,
];

// ---------------------------------------------------------------------------
// Visit time
// ---------------------------------------------------------------------------

/// Default visit time when none is given (09:00).
pub fn default_visit_time() -> NaiveTime {
    timestamps::hm(9, 0)
}

/// Default visit datetime: today at 09:00.
pub fn default_visit_datetime() -> Timestamp {
    timestamps::today().and_time(default_visit_time())
}

/// Combine the date and time parts of a visit into its stored form.
pub fn compose_visit_datetime(date: NaiveDate, time: NaiveTime) -> String {
    format_timestamp(&date.and_time(time))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_site_name(name: &str) -> Result<(), CoreError> {
    require_non_empty("site_name", name)
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_choice("status", status, SITE_STATUSES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_name_is_required() {
        assert!(validate_site_name("").is_err());
        assert!(validate_site_name("North Plant").is_ok());
    }

    #[test]
    fn statuses_are_checked() {
        assert!(validate_status(STATUS_SHOT).is_ok());
        assert!(validate_status("filmed").is_err());
    }

    #[test]
    fn visit_datetime_is_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert_eq!(
            compose_visit_datetime(date, timestamps::hm(14, 30)),
            "2024-03-08T14:30:00"
        );
    }
}
