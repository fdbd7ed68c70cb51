//! Handlers for the `/sites` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::sites;
use reelbook_core::types::DbId;
use reelbook_db::models::site::{CreateSite, Site, SiteEditView, UpdateSite};
use reelbook_db::repositories::SiteRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sites
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSite>,
) -> AppResult<(StatusCode, Json<DataResponse<Site>>)> {
    sites::validate_site_name(&input.site_name)?;
    if let Some(status) = &input.status {
        sites::validate_status(status)?;
    }

    let store = state.store.lock().await;
    let site = SiteRepo::create(&store, &input)?;

    tracing::info!(site_id = site.id, site_name = %site.site_name, "Site created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: site })))
}

/// GET /api/v1/sites
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Site>>>> {
    let store = state.store.lock().await;
    let sites = SiteRepo::list(&store)?;
    Ok(Json(DataResponse { data: sites }))
}

/// GET /api/v1/sites/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let sites = SiteRepo::list(&store)?;
    let data = build_options(&sites, |s| s.id, |s| s.site_name.clone());
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/sites/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Site>>> {
    let store = state.store.lock().await;
    let site = SiteRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Site", id))?;
    Ok(Json(DataResponse { data: site }))
}

/// GET /api/v1/sites/{id}/edit
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SiteEditView>>> {
    let store = state.store.lock().await;
    let site = SiteRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Site", id))?;
    Ok(Json(DataResponse {
        data: site.edit_view(),
    }))
}

/// PUT /api/v1/sites/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSite>,
) -> AppResult<Json<DataResponse<Site>>> {
    if let Some(name) = &input.site_name {
        sites::validate_site_name(name)?;
    }
    if let Some(status) = &input.status {
        sites::validate_status(status)?;
    }

    let store = state.store.lock().await;
    let site = SiteRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Site", id))?;

    tracing::info!(site_id = id, "Site updated");
    Ok(Json(DataResponse { data: site }))
}

/// DELETE /api/v1/sites/{id}
///
/// Also removes every asset recorded for the site.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    let deleted_assets =
        SiteRepo::delete(&store, id)?.ok_or_else(|| AppError::not_found("Site", id))?;

    tracing::info!(site_id = id, deleted_assets, "Site deleted");
    Ok(StatusCode::NO_CONTENT)
}
