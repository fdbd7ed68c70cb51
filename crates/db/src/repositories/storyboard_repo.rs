//! Repository for `storyboards.csv`.

use reelbook_core::scripts::DEFAULT_SHOT_NO;
use reelbook_core::types::DbId;

use crate::models::apply;
use crate::models::storyboard::{CreateStoryboard, Storyboard, UpdateStoryboard};
use crate::store::{DataStore, StoreError};

pub struct StoryboardRepo;

impl StoryboardRepo {
    /// Insert a shot. The caller checks that the script exists.
    pub fn create(store: &DataStore, input: &CreateStoryboard) -> Result<Storyboard, StoreError> {
        store.insert(|id| Storyboard {
            id,
            script_id: input.script_id,
            shot_no: input
                .shot_no
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SHOT_NO.to_string()),
            description: input.description.clone().unwrap_or_default(),
            image_path: input.image_path.clone().unwrap_or_default(),
            note: input.note.clone().unwrap_or_default(),
        })
    }

    pub fn list(store: &DataStore) -> Result<Vec<Storyboard>, StoreError> {
        store.load()
    }

    pub fn list_by_script(store: &DataStore, script_id: DbId) -> Result<Vec<Storyboard>, StoreError> {
        let boards: Vec<Storyboard> = store.load()?;
        Ok(boards.into_iter().filter(|b| b.script_id == script_id).collect())
    }

    pub fn find_by_id(store: &DataStore, id: DbId) -> Result<Option<Storyboard>, StoreError> {
        store.find(id)
    }

    pub fn update(
        store: &DataStore,
        id: DbId,
        input: &UpdateStoryboard,
    ) -> Result<Option<Storyboard>, StoreError> {
        store.update(id, |board: &mut Storyboard| {
            apply(&mut board.shot_no, &input.shot_no);
            apply(&mut board.description, &input.description);
            apply(&mut board.note, &input.note);
        })
    }

    pub fn delete(store: &DataStore, id: DbId) -> Result<bool, StoreError> {
        store.delete::<Storyboard>(id)
    }
}
