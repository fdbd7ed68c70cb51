//! Handlers for site material assets.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use reelbook_core::attachments::classify_mime;
use reelbook_core::preview::Preview;
use reelbook_core::types::DbId;
use reelbook_db::models::asset::{Asset, NewAsset};
use reelbook_db::repositories::{AssetRepo, SiteRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::files;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{collect_form, store_file};

/// GET /api/v1/sites/{site_id}/assets
pub async fn list_by_site(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    let store = state.store.lock().await;
    SiteRepo::find_by_id(&store, site_id)?.ok_or_else(|| AppError::not_found("Site", site_id))?;
    let assets = AssetRepo::list_by_site(&store, site_id)?;
    Ok(Json(DataResponse { data: assets }))
}

/// POST /api/v1/sites/{site_id}/assets
///
/// Multipart form: any number of file parts plus an optional `note` shared by
/// every file. Files land in the assets directory under their own name.
/// No files is a no-op answered with `200` and an empty list.
pub async fn upload(
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Asset>>>)> {
    let form = collect_form(multipart).await?;

    let store = state.store.lock().await;
    SiteRepo::find_by_id(&store, site_id)?.ok_or_else(|| AppError::not_found("Site", site_id))?;

    if form.files.is_empty() {
        return Ok((StatusCode::OK, Json(DataResponse { data: Vec::new() })));
    }

    let note = form.text("note").to_string();
    let mut items = Vec::with_capacity(form.files.len());
    for file in &form.files {
        let path = store_file(&state.config.assets_dir, &file.file_name, &file.bytes).await?;
        items.push(NewAsset {
            site_id,
            file_name: file.file_name.clone(),
            file_path: path.to_string_lossy().into_owned(),
            file_type: classify_mime(file.content_type.as_deref()),
            note: note.clone(),
        });
    }

    let assets = AssetRepo::create_batch(&store, items)?;

    tracing::info!(site_id, count = assets.len(), "Site assets uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: assets })))
}

/// GET /api/v1/assets/{id}/preview
pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Preview>>> {
    let store = state.store.lock().await;
    let asset = AssetRepo::find_by_id(&store, id)?.ok_or_else(|| AppError::not_found("Asset", id))?;
    Ok(Json(DataResponse {
        data: files::describe(&asset.file_path, asset.kind()),
    }))
}

/// GET /api/v1/assets/{id}/file
pub async fn file(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let asset = {
        let store = state.store.lock().await;
        AssetRepo::find_by_id(&store, id)?.ok_or_else(|| AppError::not_found("Asset", id))?
    };
    files::serve(&asset.file_path, &asset.file_name, asset.kind(), "Asset", id).await
}

/// DELETE /api/v1/assets/{id}
///
/// The stored file is left on disk.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !AssetRepo::delete(&store, id)? {
        return Err(AppError::not_found("Asset", id));
    }
    tracing::info!(asset_id = id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}
