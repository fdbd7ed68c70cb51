//! Repository for `schedules.csv`.

use reelbook_core::scheduling;
use reelbook_core::timestamps::{self, format_date, format_time};
use reelbook_core::types::DbId;

use crate::models::apply;
use crate::models::schedule::{CreateSchedule, Schedule, UpdateSchedule};
use crate::store::{DataStore, StoreError};

/// Provides CRUD operations for shooting schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a schedule entry. Date defaults to today, times to 09:00-10:00.
    pub fn create(store: &DataStore, input: &CreateSchedule) -> Result<Schedule, StoreError> {
        let date = input.date.unwrap_or_else(timestamps::today);
        let start = input.start_time.unwrap_or_else(scheduling::default_start_time);
        let end = input.end_time.unwrap_or_else(scheduling::default_end_time);
        store.insert(|id| Schedule {
            id,
            date: format_date(&date),
            start_time: format_time(&start),
            end_time: format_time(&end),
            location: input.location.clone().unwrap_or_default(),
            scene_desc: input.scene_desc.clone().unwrap_or_default(),
            responsible: input.responsible.clone().unwrap_or_default(),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    /// List entries by `(date, start_time)`.
    ///
    /// Stored order is kept if any row has an unparseable date or time.
    pub fn list(store: &DataStore) -> Result<Vec<Schedule>, StoreError> {
        let rows: Vec<Schedule> = store.load()?;
        Ok(scheduling::sort_chronologically(
            rows,
            |s| s.date.as_str(),
            |s| s.start_time.as_str(),
        ))
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Schedule>, StoreError> {
        store.find(id)
    }

    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateSchedule,
    ) -> Result<Option<Schedule>, StoreError> {
        store.update(id, |s: &mut Schedule| {
            apply(&mut s.date, &input.date.as_ref().map(format_date));
            apply(&mut s.start_time, &input.start_time.as_ref().map(format_time));
            apply(&mut s.end_time, &input.end_time.as_ref().map(format_time));
            apply(&mut s.location, &input.location);
            apply(&mut s.scene_desc, &input.scene_desc);
            apply(&mut s.responsible, &input.responsible);
            apply(&mut s.note, &input.note);
        })
    }

    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Schedule>(id)
    }
}
