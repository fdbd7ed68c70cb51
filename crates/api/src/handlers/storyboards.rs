//! Handlers for storyboards, created under a script.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::scripts;
use reelbook_core::types::DbId;
use reelbook_db::models::storyboard::{CreateStoryboard, Storyboard, UpdateStoryboard};
use reelbook_db::repositories::{ScriptRepo, StoryboardRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{collect_form, store_file};

/// Subdirectory of the assets directory holding storyboard images.
const STORYBOARD_DIR: &str = "storyboards";

/// GET /api/v1/scripts/{script_id}/storyboards
pub async fn list_by_script(
    State(state): State<AppState>,
    Path(script_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Storyboard>>>> {
    let store = state.store.lock().await;
    ScriptRepo::find_by_id(&store, script_id)?
        .ok_or_else(|| AppError::not_found("Script", script_id))?;
    let boards = StoryboardRepo::list_by_script(&store, script_id)?;
    Ok(Json(DataResponse { data: boards }))
}

/// POST /api/v1/scripts/{script_id}/storyboards
///
/// Multipart form with text fields `shot_no`, `description`, `note` and an
/// optional single image file (png/jpg/jpeg).
pub async fn create(
    State(state): State<AppState>,
    Path(script_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Storyboard>>)> {
    let form = collect_form(multipart).await?;
    if form.files.len() > 1 {
        return Err(AppError::BadRequest(
            "A storyboard takes at most one image".into(),
        ));
    }
    if let Some(image) = form.files.first() {
        scripts::validate_storyboard_image(&image.file_name)?;
    }

    let store = state.store.lock().await;
    ScriptRepo::find_by_id(&store, script_id)?
        .ok_or_else(|| AppError::not_found("Script", script_id))?;

    let image_path = match form.files.first() {
        Some(image) => {
            let dir = state.config.assets_dir.join(STORYBOARD_DIR);
            let path = store_file(&dir, &image.file_name, &image.bytes).await?;
            Some(path.to_string_lossy().into_owned())
        }
        None => None,
    };

    let input = CreateStoryboard {
        script_id,
        shot_no: form.optional("shot_no"),
        description: form.optional("description"),
        image_path,
        note: form.optional("note"),
    };
    let board = StoryboardRepo::create(&store, &input)?;

    tracing::info!(storyboard_id = board.id, script_id, shot_no = %board.shot_no, "Storyboard created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: board })))
}

/// GET /api/v1/storyboards
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Storyboard>>>> {
    let store = state.store.lock().await;
    let boards = StoryboardRepo::list(&store)?;
    Ok(Json(DataResponse { data: boards }))
}

/// GET /api/v1/storyboards/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let boards = StoryboardRepo::list(&store)?;
    let data = build_options(
        &boards,
        |b| b.id,
        |b| scripts::storyboard_label(b.script_id, &b.shot_no),
    );
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/storyboards/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Storyboard>>> {
    let store = state.store.lock().await;
    let board = StoryboardRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Storyboard", id))?;
    Ok(Json(DataResponse { data: board }))
}

/// PUT /api/v1/storyboards/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStoryboard>,
) -> AppResult<Json<DataResponse<Storyboard>>> {
    let store = state.store.lock().await;
    let board = StoryboardRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Storyboard", id))?;

    tracing::info!(storyboard_id = id, "Storyboard updated");
    Ok(Json(DataResponse { data: board }))
}

/// DELETE /api/v1/storyboards/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !StoryboardRepo::delete(&store, id)? {
        return Err(AppError::not_found("Storyboard", id));
    }
    tracing::info!(storyboard_id = id, "Storyboard deleted");
    Ok(StatusCode::NO_CONTENT)
}
