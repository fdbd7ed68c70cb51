//! Site material asset model.

use reelbook_core::attachments::FileType;
use reelbook_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `assets.csv`: one uploaded file belonging to a shooting site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub id: DbId,
    pub site_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub uploaded_at: String,
    pub note: String,
}

impl Record for Asset {
    const TABLE: &'static str = "assets.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "site_id",
        "file_name",
        "file_path",
        "file_type",
        "uploaded_at",
        "note",
    ];
    const ENTITY: &'static str = "Asset";

    fn id(&self) -> DbId {
        self.id
    }
}

impl Asset {
    pub fn kind(&self) -> FileType {
        FileType::from_stored(&self.file_type)
    }
}

/// A file already written to disk, ready to be recorded.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub site_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_type: FileType,
    pub note: String,
}
