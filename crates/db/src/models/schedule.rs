//! Shooting schedule model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use reelbook_core::types::DbId;
use reelbook_core::{scheduling, timestamps};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `schedules.csv`. Date and times are kept as stored text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub id: DbId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub scene_desc: String,
    pub responsible: String,
    pub note: String,
}

impl Record for Schedule {
    const TABLE: &'static str = "schedules.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "date",
        "start_time",
        "end_time",
        "location",
        "scene_desc",
        "responsible",
        "note",
    ];
    const ENTITY: &'static str = "Schedule";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a schedule entry. Missing date is today, times default to 09:00-10:00.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSchedule {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub scene_desc: Option<String>,
    pub responsible: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSchedule {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub scene_desc: Option<String>,
    pub responsible: Option<String>,
    pub note: Option<String>,
}

/// Edit-form view with stored date/times parsed, malformed values replaced by defaults.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEditView {
    pub id: DbId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub scene_desc: String,
    pub responsible: String,
    pub note: String,
}

impl Schedule {
    pub fn edit_view(&self) -> ScheduleEditView {
        ScheduleEditView {
            id: self.id,
            date: timestamps::date_or(&self.date, timestamps::today()),
            start_time: timestamps::time_or(&self.start_time, scheduling::default_start_time()),
            end_time: timestamps::time_or(&self.end_time, scheduling::default_end_time()),
            location: self.location.clone(),
            scene_desc: self.scene_desc.clone(),
            responsible: self.responsible.clone(),
            note: self.note.clone(),
        }
    }
}
