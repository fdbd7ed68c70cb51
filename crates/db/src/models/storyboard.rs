//! Storyboard model and DTOs.

use reelbook_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `storyboards.csv`, owned by a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storyboard {
    pub id: DbId,
    pub script_id: DbId,
    pub shot_no: String,
    pub description: String,
    /// Empty when the shot has no image.
    pub image_path: String,
    pub note: String,
}

impl Record for Storyboard {
    const TABLE: &'static str = "storyboards.csv";
    const HEADERS: &'static [&'static str] =
        &["id", "script_id", "shot_no", "description", "image_path", "note"];
    const ENTITY: &'static str = "Storyboard";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a storyboard shot.
#[derive(Debug, Clone, Default)]
pub struct CreateStoryboard {
    pub script_id: DbId,
    /// Defaults to `1A`.
    pub shot_no: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub note: Option<String>,
}

/// DTO for editing a storyboard. The image and owning script are fixed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStoryboard {
    pub shot_no: Option<String>,
    pub description: Option<String>,
    pub note: Option<String>,
}
