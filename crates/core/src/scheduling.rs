//! Shooting schedule and meal planning constants and ordering.

use chrono::{NaiveDate, NaiveTime};

use crate::error::CoreError;
use crate::timestamps::{self, parse_date, parse_time};
use crate::validation::validate_choice;

// ---------------------------------------------------------------------------
// Schedule defaults
// ---------------------------------------------------------------------------

/// Default slot start (09:00).
pub fn default_start_time() -> NaiveTime {
    timestamps::hm(9, 0)
}

/// Default slot end (10:00).
pub fn default_end_time() -> NaiveTime {
    timestamps::hm(10, 0)
}

// ---------------------------------------------------------------------------
// Meals
// ---------------------------------------------------------------------------

pub const MEAL_BREAKFAST: &str = "breakfast";
pub const MEAL_LUNCH: &str = "lunch";
pub const MEAL_DINNER: &str = "dinner";
pub const MEAL_LATE_NIGHT: &str = "late_night";

pub const MEAL_TYPES: &[&str] = &[MEAL_BREAKFAST, MEAL_LUNCH, MEAL_DINNER, MEAL_LATE_NIGHT];

/// Default meal time (12:00).
pub fn default_meal_time() -> NaiveTime {
    timestamps::hm(12, 0)
}

pub fn validate_meal_type(meal_type: &str) -> Result<(), CoreError> {
    validate_choice("meal type", meal_type, MEAL_TYPES)
}

/// Display label for a schedule slot.
pub fn schedule_label(date: &str, location: &str) -> String {
    format!("{date} {location}").trim().to_string()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Sort records by their stored `(date, time)` columns.
///
/// If any record has a value that does not parse, the stored order is kept
/// for the whole list rather than sorting a partial view. Equal keys keep
/// their stored order.
pub fn sort_chronologically<T>(
    items: Vec<T>,
    date: impl Fn(&T) -> &str,
    time: impl Fn(&T) -> &str,
) -> Vec<T> {
    let keys: Option<Vec<(NaiveDate, NaiveTime)>> = items
        .iter()
        .map(|item| Some((parse_date(date(item))?, parse_time(time(item))?)))
        .collect();

    let Some(keys) = keys else {
        return items;
    };

    let mut keyed: Vec<_> = keys.into_iter().zip(items).collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, item)| item).collect()
}
