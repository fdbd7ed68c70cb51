//! Repository for `scripts.csv`.

use reelbook_core::scripts::DEFAULT_SCRIPT_VERSION;
use reelbook_core::types::{format_timestamp, now, DbId};

use crate::models::apply;
use crate::models::script::{CreateScript, Script, UpdateScript};
use crate::models::storyboard::Storyboard;
use crate::store::{DataStore, StoreError};

/// Provides CRUD operations for interview scripts.
pub struct ScriptRepo;

impl ScriptRepo {
    /// Insert a new script stamped with the current time.
    pub fn create(store: &DataStore, input: &CreateScript) -> Result<Script, StoreError> {
        store.insert(|id| Script {
            id,
            category: input.category.clone().unwrap_or_default(),
            title: input.title.trim().to_string(),
            content: input.content.clone().unwrap_or_default(),
            version: input
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_SCRIPT_VERSION.to_string()),
            is_approved: input.is_approved.unwrap_or(false),
            updated_at: format_timestamp(&now()),
        })
    }

    pub fn list(store: &DataStore) -> Result<Vec<Script>, StoreError> {
        store.load()
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Script>, StoreError> {
        store.find(id)
    }

    /// Overwrite the given fields and bump `updated_at`.
    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateScript,
    ) -> Result<Option<Script>, StoreError> {
        store.update(id, |script: &mut Script| {
            apply(&mut script.category, &input.category);
            apply(&mut script.title, &input.title);
            apply(&mut script.content, &input.content);
            apply(&mut script.version, &input.version);
            apply(&mut script.is_approved, &input.is_approved);
            script.updated_at = format_timestamp(&now());
        })
    }

    /// Delete a script and its storyboards in one transaction.
    ///
    /// Returns the number of storyboards removed, or `None` if the script did not exist.
    pub fn delete(store: &DataStore, id: DbId) -> Result<Option<usize>, StoreError> {
        let mut scripts: Vec<Script> = store.load()?;
        let before = scripts.len();
        scripts.retain(|s| s.id != id);
        if scripts.len() == before {
            return Ok(None);
        }

        let mut boards: Vec<Storyboard> = store.load()?;
        let board_count = boards.len();
        boards.retain(|b| b.script_id != id);
        let removed = board_count - boards.len();

        let mut tx = store.begin();
        tx.stage(&scripts)?;
        tx.stage(&boards)?;
        tx.commit()?;
        Ok(Some(removed))
    }
}
