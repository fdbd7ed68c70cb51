//! Handlers for the `/schedules` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::scheduling::schedule_label;
use reelbook_core::types::DbId;
use reelbook_db::models::schedule::{CreateSchedule, Schedule, ScheduleEditView, UpdateSchedule};
use reelbook_db::repositories::ScheduleRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/schedules
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<Schedule>>)> {
    let store = state.store.lock().await;
    let schedule = ScheduleRepo::create(&store, &input)?;

    tracing::info!(schedule_id = schedule.id, date = %schedule.date, "Schedule created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: schedule })))
}

/// GET /api/v1/schedules
///
/// Sorted by date and start time.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let store = state.store.lock().await;
    let schedules = ScheduleRepo::list(&store)?;
    tracing::debug!(count = schedules.len(), "Listed schedules");
    Ok(Json(DataResponse { data: schedules }))
}

/// GET /api/v1/schedules/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let schedules = ScheduleRepo::list(&store)?;
    let data = build_options(&schedules, |s| s.id, |s| schedule_label(&s.date, &s.location));
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/schedules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let store = state.store.lock().await;
    let schedule = ScheduleRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Schedule", id))?;
    Ok(Json(DataResponse { data: schedule }))
}

/// GET /api/v1/schedules/{id}/edit
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ScheduleEditView>>> {
    let store = state.store.lock().await;
    let schedule = ScheduleRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Schedule", id))?;
    Ok(Json(DataResponse {
        data: schedule.edit_view(),
    }))
}

/// PUT /api/v1/schedules/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSchedule>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let store = state.store.lock().await;
    let schedule = ScheduleRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Schedule", id))?;

    tracing::info!(schedule_id = id, "Schedule updated");
    Ok(Json(DataResponse { data: schedule }))
}

/// DELETE /api/v1/schedules/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !ScheduleRepo::delete(&store, id)? {
        return Err(AppError::not_found("Schedule", id));
    }
    tracing::info!(schedule_id = id, "Schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}
