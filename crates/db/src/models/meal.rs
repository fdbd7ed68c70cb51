//! Meal arrangement model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use reelbook_core::types::DbId;
use reelbook_core::validation::choice_or;
use reelbook_core::{scheduling, timestamps};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `meals.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    pub id: DbId,
    pub date: String,
    pub meal_type: String,
    pub time: String,
    /// Free text: names or a head count.
    pub people: String,
    pub vendor: String,
    pub note: String,
}

impl Record for Meal {
    const TABLE: &'static str = "meals.csv";
    const HEADERS: &'static [&'static str] =
        &["id", "date", "meal_type", "time", "people", "vendor", "note"];
    const ENTITY: &'static str = "Meal";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a meal. Defaults: today, `breakfast`, 12:00.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMeal {
    pub date: Option<NaiveDate>,
    pub meal_type: Option<String>,
    pub time: Option<NaiveTime>,
    pub people: Option<String>,
    pub vendor: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMeal {
    pub date: Option<NaiveDate>,
    pub meal_type: Option<String>,
    pub time: Option<NaiveTime>,
    pub people: Option<String>,
    pub vendor: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealEditView {
    pub id: DbId,
    pub date: NaiveDate,
    pub meal_type: &'static str,
    pub time: NaiveTime,
    pub people: String,
    pub vendor: String,
    pub note: String,
}

impl Meal {
    pub fn edit_view(&self) -> MealEditView {
        MealEditView {
            id: self.id,
            date: timestamps::date_or(&self.date, timestamps::today()),
            // Unrecognised meal types open on lunch.
            meal_type: choice_or(&self.meal_type, scheduling::MEAL_TYPES, scheduling::MEAL_LUNCH),
            time: timestamps::time_or(&self.time, scheduling::default_meal_time()),
            people: self.people.clone(),
            vendor: self.vendor.clone(),
            note: self.note.clone(),
        }
    }
}
