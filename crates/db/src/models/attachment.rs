//! Generic attachment model.

use reelbook_core::attachments::FileType;
use reelbook_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `attachments.csv`, owned by `(module, ref_id)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub id: DbId,
    pub module: String,
    pub ref_id: DbId,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub uploaded_at: String,
    pub note: String,
}

impl Record for Attachment {
    const TABLE: &'static str = "attachments.csv";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "module",
        "ref_id",
        "title",
        "file_name",
        "file_path",
        "file_type",
        "uploaded_at",
        "note",
    ];
    const ENTITY: &'static str = "Attachment";

    fn id(&self) -> DbId {
        self.id
    }
}

impl Attachment {
    pub fn kind(&self) -> FileType {
        FileType::from_stored(&self.file_type)
    }
}

/// A stored upload awaiting its attachment record.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub module: String,
    pub ref_id: DbId,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: FileType,
    pub note: String,
}
