//! Attachment classification and module tags.
//!
//! Attachments belong to a `(module, ref_id)` pair: the module tag names the
//! owning table and `ref_id` is the owning record's id. Uploaded blobs are
//! classified from their declared MIME type only; the bytes are never sniffed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Module tags
// ---------------------------------------------------------------------------

pub const MODULE_SITE: &str = "site";
pub const MODULE_SCRIPT: &str = "script";
pub const MODULE_STORYBOARD: &str = "storyboard";
pub const MODULE_DEPARTMENT: &str = "department";
pub const MODULE_SCHEDULE: &str = "schedule";
pub const MODULE_MEAL: &str = "meal";
pub const MODULE_EDITING: &str = "editing";

/// Every module that can own attachments.
pub const VALID_MODULES: &[&str] = &[
    MODULE_SITE,
    MODULE_SCRIPT,
    MODULE_STORYBOARD,
    MODULE_DEPARTMENT,
    MODULE_SCHEDULE,
    MODULE_MEAL,
    MODULE_EDITING,
];

/// Validate that a module tag is known.
pub fn validate_module(module: &str) -> Result<(), CoreError> {
    if VALID_MODULES.contains(&module) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown attachment module '{module}'. Must be one of: {}",
            VALID_MODULES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// File type
// ---------------------------------------------------------------------------

/// Coarse file category driving preview behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Image,
    Video,
    Pdf,
    Other,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Pdf => "pdf",
            FileType::Other => "other",
        }
    }

    /// Parse a stored value. Anything unrecognised is `Other`.
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim() {
            "image" => FileType::Image,
            "video" => FileType::Video,
            "pdf" => FileType::Pdf,
            _ => FileType::Other,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a declared MIME type.
///
/// `image*` and `video*` match by prefix, `application/pdf` exactly;
/// everything else (including a missing type) is [`FileType::Other`].
pub fn classify_mime(mime: Option<&str>) -> FileType {
    match mime {
        Some(m) if m.starts_with("image") => FileType::Image,
        Some(m) if m.starts_with("video") => FileType::Video,
        Some("application/pdf") => FileType::Pdf,
        _ => FileType::Other,
    }
}

// ---------------------------------------------------------------------------
// Upload naming
// ---------------------------------------------------------------------------

/// Reduce a client-supplied file name to its final path component.
///
/// Both `/` and `\` are treated as separators. Returns `None` when nothing
/// usable is left (empty, `.` or `..`).
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();
    match base {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Title stored for an uploaded file: the shared title, or the file name when blank.
pub fn attachment_title(shared_title: &str, file_name: &str) -> String {
    if shared_title.trim().is_empty() {
        file_name.to_string()
    } else {
        shared_title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_declared_types() {
        assert_eq!(classify_mime(Some("image/png")), FileType::Image);
        assert_eq!(classify_mime(Some("video/mp4")), FileType::Video);
        assert_eq!(classify_mime(Some("application/pdf")), FileType::Pdf);
        assert_eq!(classify_mime(Some("text/plain")), FileType::Other);
        assert_eq!(classify_mime(None), FileType::Other);
        assert_eq!(classify_mime(Some("")), FileType::Other);
    }

    #[test]
    fn pdf_requires_exact_match() {
        assert_eq!(classify_mime(Some("application/pdf; charset=binary")), FileType::Other);
        assert_eq!(classify_mime(Some("application/x-pdf")), FileType::Other);
    }

    #[test]
    fn stored_file_type_is_lenient() {
        assert_eq!(FileType::from_stored("video"), FileType::Video);
        assert_eq!(FileType::from_stored("nonsense"), FileType::Other);
    }

    #[test]
    fn module_tags_are_validated() {
        assert!(validate_module("site").is_ok());
        assert!(validate_module("editing").is_ok());
        assert!(validate_module("sites").is_err());
        assert!(validate_module("").is_err());
    }

    #[test]
    fn file_names_lose_directory_components() {
        assert_eq!(sanitize_file_name("plan.pdf").as_deref(), Some("plan.pdf"));
        assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_file_name("C:\\shots\\a.jpg").as_deref(), Some("a.jpg"));
        assert_eq!(sanitize_file_name("dir/"), None);
        assert_eq!(sanitize_file_name(".."), None);
    }

    #[test]
    fn blank_title_defaults_to_file_name() {
        assert_eq!(attachment_title("", "a.png"), "a.png");
        assert_eq!(attachment_title("  ", "a.png"), "a.png");
        assert_eq!(attachment_title("Contract", "a.png"), "Contract");
    }
}
