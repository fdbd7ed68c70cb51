//! Repository for `editing_tasks.csv`.

use reelbook_core::editing;
use reelbook_core::types::{format_timestamp, now, DbId};

use crate::models::apply;
use crate::models::editing_task::{CreateEditingTask, EditingTask, UpdateEditingTask};
use crate::store::{DataStore, StoreError};

/// Provides CRUD operations for editing tasks.
pub struct EditingTaskRepo;

impl EditingTaskRepo {
    pub fn create(store: &DataStore, input: &CreateEditingTask) -> Result<EditingTask, StoreError> {
        store.insert(|id| EditingTask {
            id,
            clip_name: input.clip_name.trim().to_string(),
            clip_type: input
                .clip_type
                .clone()
                .unwrap_or_else(|| editing::CLIP_FEATURE.to_string()),
            editor: input.editor.clone().unwrap_or_default(),
            status: input
                .status
                .clone()
                .unwrap_or_else(|| editing::STATUS_NOT_STARTED.to_string()),
            version: input
                .version
                .clone()
                .unwrap_or_else(|| editing::DEFAULT_EDIT_VERSION.to_string()),
            last_update: format_timestamp(&now()),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    pub fn list(store: &DataStore) -> Result<Vec<EditingTask>, StoreError> {
        store.load()
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<EditingTask>, StoreError> {
        store.find(id)
    }

    /// Overwrite the given fields and bump `last_update`.
    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateEditingTask,
    ) -> Result<Option<EditingTask>, StoreError> {
        store.update(id, |task: &mut EditingTask| {
            apply(&mut task.clip_name, &input.clip_name);
            apply(&mut task.clip_type, &input.clip_type);
            apply(&mut task.editor, &input.editor);
            apply(&mut task.status, &input.status);
            apply(&mut task.version, &input.version);
            apply(&mut task.note, &input.note);
            task.last_update = format_timestamp(&now());
        })
    }

    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<EditingTask>(id)
    }
}
