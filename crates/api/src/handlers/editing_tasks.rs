//! Handlers for the `/editing-tasks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::editing;
use reelbook_core::error::CoreError;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::types::DbId;
use reelbook_db::models::editing_task::{
    CreateEditingTask, EditingTask, EditingTaskEditView, UpdateEditingTask,
};
use reelbook_db::repositories::EditingTaskRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_choices(clip_type: Option<&str>, status: Option<&str>) -> Result<(), CoreError> {
    if let Some(clip_type) = clip_type {
        editing::validate_clip_type(clip_type)?;
    }
    if let Some(status) = status {
        editing::validate_status(status)?;
    }
    Ok(())
}

/// POST /api/v1/editing-tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEditingTask>,
) -> AppResult<(StatusCode, Json<DataResponse<EditingTask>>)> {
    editing::validate_clip_name(&input.clip_name)?;
    validate_choices(input.clip_type.as_deref(), input.status.as_deref())?;

    let store = state.store.lock().await;
    let task = EditingTaskRepo::create(&store, &input)?;

    tracing::info!(task_id = task.id, clip_name = %task.clip_name, "Editing task created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/editing-tasks
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EditingTask>>>> {
    let store = state.store.lock().await;
    let tasks = EditingTaskRepo::list(&store)?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/editing-tasks/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let tasks = EditingTaskRepo::list(&store)?;
    let data = build_options(&tasks, |t| t.id, |t| t.clip_name.clone());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/editing-tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EditingTask>>> {
    let store = state.store.lock().await;
    let task = EditingTaskRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("EditingTask", id))?;
    Ok(Json(DataResponse { data: task }))
}

/// GET /api/v1/editing-tasks/{id}/edit
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EditingTaskEditView>>> {
    let store = state.store.lock().await;
    let task = EditingTaskRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("EditingTask", id))?;
    Ok(Json(DataResponse {
        data: task.edit_view(),
    }))
}

/// PUT /api/v1/editing-tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEditingTask>,
) -> AppResult<Json<DataResponse<EditingTask>>> {
    if let Some(name) = &input.clip_name {
        editing::validate_clip_name(name)?;
    }
    validate_choices(input.clip_type.as_deref(), input.status.as_deref())?;

    let store = state.store.lock().await;
    let task = EditingTaskRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("EditingTask", id))?;

    tracing::info!(task_id = id, status = %task.status, "Editing task updated");
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/editing-tasks/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !EditingTaskRepo::delete(&store, id)? {
        return Err(AppError::not_found("EditingTask", id));
    }
    tracing::info!(task_id = id, "Editing task deleted");
    Ok(StatusCode::NO_CONTENT)
}
