//! Serving stored files and their preview descriptors.

use std::path::Path;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use reelbook_core::attachments::FileType;
use reelbook_core::preview::{self, Preview};

use crate::error::{AppError, AppResult};

/// Preview descriptor for a stored file. A missing file is logged, not an error.
pub fn describe(path: &str, file_type: FileType) -> Preview {
    let preview = preview::preview_for(Path::new(path), file_type);
    if let Preview::Missing { warning } = &preview {
        tracing::warn!(path, %warning, "Stored file missing");
    }
    preview
}

/// Stream the bytes at `path` with a content type and disposition matching `file_type`.
pub async fn serve(
    path: &str,
    file_name: &str,
    file_type: FileType,
    entity: &'static str,
    id: i64,
) -> AppResult<Response> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path, "Stored file missing");
            return Err(AppError::not_found(entity, id));
        }
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    let disposition = if preview::is_inline(file_type) {
        "inline"
    } else {
        "attachment"
    };
    let safe_name = file_name.replace('"', "");

    Ok((
        [
            (
                header::CONTENT_TYPE,
                preview::content_type_for(file_type, file_name).to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{safe_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
