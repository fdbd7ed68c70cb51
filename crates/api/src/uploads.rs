//! Multipart form collection and on-disk storage for uploaded files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use reelbook_core::attachments::sanitize_file_name;

use crate::error::{AppError, AppResult};

/// One uploaded file part.
#[derive(Debug)]
pub struct UploadedFile {
    /// Base name as sent by the client, directory components stripped.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A drained multipart form: every file part plus the plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Text field value, empty when absent.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Text field value, `None` when absent or blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Read every part of a multipart body.
///
/// Parts carrying a file name are files; all other parts are text fields.
/// A file part with an empty name and an empty body (an unfilled file input)
/// is dropped. Any other name that sanitises to nothing is rejected.
pub async fn collect_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match field.file_name().map(str::to_string) {
            Some(raw_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // An empty file input still arrives as a part with no name and no body.
                if raw_name.is_empty() && bytes.is_empty() {
                    tracing::debug!(field = %name, "Skipped empty file input");
                    continue;
                }
                let file_name = sanitize_file_name(&raw_name).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid file name '{raw_name}'"))
                })?;
                form.files.push(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }
    }

    Ok(form)
}

/// Write `bytes` to `<dir>/<file_name>`, creating `dir` as needed.
///
/// An existing file with the same name is overwritten.
pub async fn store_file(dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(path)
}
