//! Repository for `meals.csv`.

use reelbook_core::scheduling;
use reelbook_core::timestamps::{self, format_date, format_time};
use reelbook_core::types::DbId;

use crate::models::apply;
use crate::models::meal::{CreateMeal, Meal, UpdateMeal};
use crate::store::{DataStore, StoreError};

pub struct MealRepo;

impl MealRepo {
    /// Insert a meal. Defaults: today, first meal type, 12:00.
    pub fn create(store: &DataStore, input: &CreateMeal) -> Result<Meal, StoreError> {
        let date = input.date.unwrap_or_else(timestamps::today);
        let time = input.time.unwrap_or_else(scheduling::default_meal_time);
        store.insert(|id| Meal {
            id,
            date: format_date(&date),
            meal_type: input
                .meal_type
                .clone()
                .unwrap_or_else(|| scheduling::MEAL_BREAKFAST.to_string()),
            time: format_time(&time),
            people: input.people.clone().unwrap_or_default(),
            vendor: input.vendor.clone().unwrap_or_default(),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    /// List meals by `(date, time)`, or in stored order if any value is malformed.
    pub fn list(store: &DataStore) -> Result<Vec<Meal>, StoreError> {
        let rows: Vec<Meal> = store.load()?;
        Ok(scheduling::sort_chronologically(
            rows,
            |m| m.date.as_str(),
            |m| m.time.as_str(),
        ))
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Meal>, StoreError> {
        store.find(id)
    }

    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateMeal,
    ) -> Result<Option<Meal>, StoreError> {
        store.update(id, |m: &mut Meal| {
            apply(&mut m.date, &input.date.as_ref().map(format_date));
            apply(&mut m.meal_type, &input.meal_type);
            apply(&mut m.time, &input.time.as_ref().map(format_time));
            apply(&mut m.people, &input.people);
            apply(&mut m.vendor, &input.vendor);
            apply(&mut m.note, &input.note);
        })
    }

    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Meal>(id)
    }
}
