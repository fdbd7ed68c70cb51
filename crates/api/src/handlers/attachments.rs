//! Handlers for generic attachments owned by `(module, ref_id)`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use reelbook_core::attachments::{self, attachment_title, classify_mime};
use reelbook_core::preview::Preview;
use reelbook_core::types::DbId;
use reelbook_db::models::attachment::{Attachment, NewAttachment};
use reelbook_db::repositories::{
    AttachmentRepo, DepartmentRepo, EditingTaskRepo, MealRepo, ScheduleRepo, ScriptRepo,
    SiteRepo, StoryboardRepo,
};
use reelbook_db::{DataStore, StoreError};

use crate::error::{AppError, AppResult};
use crate::handlers::files;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{collect_form, store_file};

/// Entity name and existence of the record a module tag refers to.
fn owner(
    store: &DataStore,
    module: &str,
    ref_id: DbId,
) -> Result<(&'static str, bool), StoreError> {
    Ok(match module {
        attachments::MODULE_SITE => ("Site", SiteRepo::find_by_id(store, ref_id)?.is_some()),
        attachments::MODULE_SCRIPT => ("Script", ScriptRepo::find_by_id(store, ref_id)?.is_some()),
        attachments::MODULE_STORYBOARD => (
            "Storyboard",
            StoryboardRepo::find_by_id(store, ref_id)?.is_some(),
        ),
        attachments::MODULE_DEPARTMENT => (
            "Department",
            DepartmentRepo::find_by_id(store, ref_id)?.is_some(),
        ),
        attachments::MODULE_SCHEDULE => (
            "Schedule",
            ScheduleRepo::find_by_id(store, ref_id)?.is_some(),
        ),
        attachments::MODULE_MEAL => ("Meal", MealRepo::find_by_id(store, ref_id)?.is_some()),
        attachments::MODULE_EDITING => (
            "EditingTask",
            EditingTaskRepo::find_by_id(store, ref_id)?.is_some(),
        ),
        _ => ("Record", false),
    })
}

/// GET /api/v1/attachments/{module}/{ref_id}
pub async fn list(
    State(state): State<AppState>,
    Path((module, ref_id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Vec<Attachment>>>> {
    attachments::validate_module(&module)?;

    let store = state.store.lock().await;
    let items = AttachmentRepo::list_for(&store, &module, ref_id)?;
    tracing::debug!(module = %module, ref_id, count = items.len(), "Listed attachments");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/attachments/{module}/{ref_id}
///
/// Multipart form: any number of file parts plus optional `title` and `note`
/// shared by every file. A blank title falls back to each file's name.
/// Files are written to `<upload_dir>/<module>/<file name>`, replacing any
/// earlier file of the same name. No files is a no-op.
pub async fn upload(
    State(state): State<AppState>,
    Path((module, ref_id)): Path<(String, DbId)>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Attachment>>>)> {
    attachments::validate_module(&module)?;
    let form = collect_form(multipart).await?;

    let store = state.store.lock().await;
    let (entity, exists) = owner(&store, &module, ref_id)?;
    if !exists {
        return Err(AppError::not_found(entity, ref_id));
    }

    if form.files.is_empty() {
        return Ok((StatusCode::OK, Json(DataResponse { data: Vec::new() })));
    }

    let title = form.text("title");
    let note = form.text("note");
    let dir = state.config.upload_dir.join(&module);
    let mut items = Vec::with_capacity(form.files.len());
    for file in &form.files {
        let path = store_file(&dir, &file.file_name, &file.bytes).await?;
        items.push(NewAttachment {
            module: module.clone(),
            ref_id,
            title: attachment_title(title, &file.file_name),
            file_name: file.file_name.clone(),
            file_path: path.to_string_lossy().into_owned(),
            file_type: classify_mime(file.content_type.as_deref()),
            note: note.to_string(),
        });
    }

    let created = AttachmentRepo::create_batch(&store, items)?;

    tracing::info!(module = %module, ref_id, count = created.len(), "Attachments uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/attachments/{id}/preview
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Preview>>> {
    let store = state.store.lock().await;
    let item = AttachmentRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Attachment", id))?;
    Ok(Json(DataResponse {
        data: files::describe(&item.file_path, item.kind()),
    }))
}

/// GET /api/v1/attachments/{id}/file
pub async fn file(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let item = {
        let store = state.store.lock().await;
        AttachmentRepo::find_by_id(&store, id)?
            .ok_or_else(|| AppError::not_found("Attachment", id))?
    };
    files::serve(&item.file_path, &item.file_name, item.kind(), "Attachment", id).await
}

/// DELETE /api/v1/attachments/{id}
///
/// Removes the record only; the stored file stays on disk.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !AttachmentRepo::delete(&store, id)? {
        return Err(AppError::not_found("Attachment", id));
    }
    tracing::info!(attachment_id = id, "Attachment deleted");
    Ok(StatusCode::NO_CONTENT)
}
