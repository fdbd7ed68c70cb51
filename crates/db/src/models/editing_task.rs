//! Editing task model and DTOs.

use reelbook_core::types::{now, DbId, Timestamp};
use reelbook_core::validation::choice_or_first;
use reelbook_core::{editing, timestamps};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `editing_tasks.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingTask {
    pub id: DbId,
    pub clip_name: String,
    #[serde(rename = "type")]
    pub clip_type: String,
    pub editor: String,
    pub status: String,
    pub version: String,
    pub last_update: String,
    pub note: String,
}

impl Record for EditingTask {
    const TABLE: &'static str = "editing_tasks.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "clip_name",
        "type",
        "editor",
        "status",
        "version",
        "last_update",
        "note",
    ];
    const ENTITY: &'static str = "EditingTask";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating an editing task. Defaults: `feature`, `not_started`, `v0.1`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEditingTask {
    pub clip_name: String,
    #[serde(rename = "type")]
    pub clip_type: Option<String>,
    pub editor: Option<String>,
    pub status: Option<String>,
    pub version: Option<String>,
    pub note: Option<String>,
}

/// DTO for editing a task. `last_update` is always bumped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEditingTask {
    pub clip_name: Option<String>,
    #[serde(rename = "type")]
    pub clip_type: Option<String>,
    pub editor: Option<String>,
    pub status: Option<String>,
    pub version: Option<String>,
    pub note: Option<String>,
}

/// Edit-form view of an editing task.
#[derive(Debug, Clone, Serialize)]
pub struct EditingTaskEditView {
    pub id: DbId,
    pub clip_name: String,
    #[serde(rename = "type")]
    pub clip_type: &'static str,
    pub editor: String,
    pub status: &'static str,
    pub version: String,
    pub last_update: Timestamp,
    pub note: String,
}

impl EditingTask {
    pub fn edit_view(&self) -> EditingTaskEditView {
        EditingTaskEditView {
            id: self.id,
            clip_name: self.clip_name.clone(),
            clip_type: choice_or_first(&self.clip_type, editing::CLIP_TYPES),
            editor: self.editor.clone(),
            status: choice_or_first(&self.status, editing::EDITING_STATUSES),
            version: self.version.clone(),
            last_update: timestamps::datetime_or(&self.last_update, now()),
            note: self.note.clone(),
        }
    }
}
