//! Handlers for the `/scripts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::scripts;
use reelbook_core::types::DbId;
use reelbook_db::models::script::{CreateScript, Script, ScriptEditView, UpdateScript};
use reelbook_db::repositories::ScriptRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/scripts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScript>,
) -> AppResult<(StatusCode, Json<DataResponse<Script>>)> {
    scripts::validate_title(&input.title)?;

    let store = state.store.lock().await;
    let script = ScriptRepo::create(&store, &input)?;

    tracing::info!(script_id = script.id, title = %script.title, "Script created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: script })))
}

/// GET /api/v1/scripts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Script>>>> {
    let store = state.store.lock().await;
    let scripts = ScriptRepo::list(&store)?;
    tracing::debug!(count = scripts.len(), "Listed scripts");
    Ok(Json(DataResponse { data: scripts }))
}

/// GET /api/v1/scripts/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let scripts = ScriptRepo::list(&store)?;
    let data = build_options(&scripts, |s| s.id, |s| s.title.clone());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/scripts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Script>>> {
    let store = state.store.lock().await;
    let script = ScriptRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Script", id))?;
    Ok(Json(DataResponse { data: script }))
}

/// GET /api/v1/scripts/{id}/edit
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ScriptEditView>>> {
    let store = state.store.lock().await;
    let script = ScriptRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Script", id))?;
    Ok(Json(DataResponse {
        data: script.edit_view(),
    }))
}

/// PUT /api/v1/scripts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScript>,
) -> AppResult<Json<DataResponse<Script>>> {
    if let Some(title) = &input.title {
        scripts::validate_title(title)?;
    }

    let store = state.store.lock().await;
    let script = ScriptRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Script", id))?;

    tracing::info!(script_id = id, "Script updated");
    Ok(Json(DataResponse { data: script }))
}

/// DELETE /api/v1/scripts/{id}
///
/// Also removes the script's storyboards.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    let deleted_storyboards =
        ScriptRepo::delete(&store, id)?.ok_or_else(|| AppError::not_found("Script", id))?;

    tracing::info!(script_id = id, deleted_storyboards, "Script deleted");
    Ok(StatusCode::NO_CONTENT)
}
