//! Preview dispatch for stored files.
//!
//! Images and videos render inline, PDFs and everything else are offered as
//! downloads. A file that has gone missing from disk produces a warning
//! descriptor rather than an error, so one broken row never hides the rest
//! of a listing.

use std::path::Path;

use serde::Serialize;

use crate::attachments::FileType;

/// Label on the download action for PDFs.
pub const PDF_DOWNLOAD_LABEL: &str = "Download PDF";

/// Label on the download action for all other non-previewable files.
pub const FILE_DOWNLOAD_LABEL: &str = "Download file";

/// How a client should present a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    /// Render inline as an image.
    Image { file_name: String },
    /// Render inline as a video player.
    Video { file_name: String },
    /// Offer a download button.
    Download {
        label: &'static str,
        file_name: String,
        mime: Option<&'static str>,
    },
    /// The stored path no longer exists.
    Missing { warning: String },
}

/// Decide how to present the file at `path` given its stored type.
pub fn preview_for(path: &Path, file_type: FileType) -> Preview {
    if !path.exists() {
        return Preview::Missing {
            warning: format!("File not found: {}", path.display()),
        };
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_type {
        FileType::Image => Preview::Image { file_name },
        FileType::Video => Preview::Video { file_name },
        FileType::Pdf => Preview::Download {
            label: PDF_DOWNLOAD_LABEL,
            file_name,
            mime: Some("application/pdf"),
        },
        FileType::Other => Preview::Download {
            label: FILE_DOWNLOAD_LABEL,
            file_name,
            mime: None,
        },
    }
}

/// Whether the raw file endpoint should serve the file `inline`.
pub fn is_inline(file_type: FileType) -> bool {
    matches!(file_type, FileType::Image | FileType::Video)
}

/// Content type used when serving a stored file.
///
/// The declared upload type is not stored, so image and video types are
/// recovered from the extension.
pub fn content_type_for(file_type: FileType, file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match (file_type, ext.as_str()) {
        (FileType::Pdf, _) => "application/pdf",
        (FileType::Image, "png") => "image/png",
        (FileType::Image, "jpg" | "jpeg") => "image/jpeg",
        (FileType::Image, "gif") => "image/gif",
        (FileType::Image, "webp") => "image/webp",
        (FileType::Video, "mp4") => "video/mp4",
        (FileType::Video, "webm") => "video/webm",
        (FileType::Video, "mov") => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn temp_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn missing_file_is_a_warning() {
        let preview = preview_for(Path::new("/definitely/not/here.png"), FileType::Image);
        assert_matches!(preview, Preview::Missing { warning } if warning.contains("here.png"));
    }

    #[test]
    fn dispatches_on_file_type() {
        let dir = tempfile::tempdir().unwrap();
        let img = temp_file(&dir, "still.png");
        assert_matches!(preview_for(&img, FileType::Image), Preview::Image { file_name } if file_name == "still.png");

        let vid = temp_file(&dir, "take.mp4");
        assert_matches!(preview_for(&vid, FileType::Video), Preview::Video { .. });

        let pdf = temp_file(&dir, "plan.pdf");
        assert_matches!(
            preview_for(&pdf, FileType::Pdf),
            Preview::Download { label: PDF_DOWNLOAD_LABEL, mime: Some("application/pdf"), .. }
        );

        let other = temp_file(&dir, "notes.txt");
        assert_matches!(
            preview_for(&other, FileType::Other),
            Preview::Download { label: FILE_DOWNLOAD_LABEL, mime: None, .. }
        );
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for(FileType::Image, "A.JPG"), "image/jpeg");
        assert_eq!(content_type_for(FileType::Video, "clip.mov"), "video/quicktime");
        assert_eq!(content_type_for(FileType::Pdf, "x"), "application/pdf");
        assert_eq!(content_type_for(FileType::Other, "x.png"), "application/octet-stream");
        assert!(is_inline(FileType::Video));
        assert!(!is_inline(FileType::Pdf));
    }
}
