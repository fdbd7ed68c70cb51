//! Interview script model and DTOs.

use reelbook_core::timestamps;
use reelbook_core::types::{now, DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::lenient_flag;
use crate::store::Record;

/// A row of `scripts.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub id: DbId,
    pub category: String,
    pub title: String,
    pub content: String,
    pub version: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_approved: bool,
    pub updated_at: String,
}

impl Record for Script {
    const TABLE: &'static str = "scripts.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "category",
        "title",
        "content",
        "version",
        "is_approved",
        "updated_at",
    ];
    const ENTITY: &'static str = "Script";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a script.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScript {
    pub category: Option<String>,
    pub title: String,
    pub content: Option<String>,
    /// Defaults to `v1.0`.
    pub version: Option<String>,
    /// Defaults to `false`.
    pub is_approved: Option<bool>,
}

/// DTO for editing a script. All fields are optional; `updated_at` is always bumped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScript {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub version: Option<String>,
    pub is_approved: Option<bool>,
}

/// Edit-form view of a script with `updated_at` parsed.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptEditView {
    pub id: DbId,
    pub category: String,
    pub title: String,
    pub content: String,
    pub version: String,
    pub is_approved: bool,
    pub updated_at: Timestamp,
}

impl Script {
    pub fn edit_view(&self) -> ScriptEditView {
        ScriptEditView {
            id: self.id,
            category: self.category.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            version: self.version.clone(),
            is_approved: self.is_approved,
            updated_at: timestamps::datetime_or(&self.updated_at, now()),
        }
    }
}
