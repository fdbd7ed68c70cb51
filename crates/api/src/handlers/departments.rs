//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::departments::validate_name;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::types::DbId;
use reelbook_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use reelbook_db::repositories::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DataResponse<Department>>)> {
    validate_name(&input.name)?;

    let store = state.store.lock().await;
    let dept = DepartmentRepo::create(&store, &input)?;

    tracing::info!(department_id = dept.id, name = %dept.name, "Department member created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: dept })))
}

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let store = state.store.lock().await;
    let depts = DepartmentRepo::list(&store)?;
    Ok(Json(DataResponse { data: depts }))
}

/// GET /api/v1/departments/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let depts = DepartmentRepo::list(&store)?;
    let data = build_options(
        &depts,
        |d| d.id,
        |d| {
            if d.role.is_empty() {
                d.name.clone()
            } else {
                format!("{} ({})", d.name, d.role)
            }
        },
    );
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/departments/{id}
///
/// Also mounted at `/{id}/edit`: a department has no derived fields to prefill.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Department>>> {
    let store = state.store.lock().await;
    let dept = DepartmentRepo::find_by_id(&store, id)?
        .ok_or_else(|| AppError::not_found("Department", id))?;
    Ok(Json(DataResponse { data: dept }))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DataResponse<Department>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }

    let store = state.store.lock().await;
    let dept = DepartmentRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Department", id))?;

    tracing::info!(department_id = id, "Department member updated");
    Ok(Json(DataResponse { data: dept }))
}

/// DELETE /api/v1/departments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !DepartmentRepo::delete(&store, id)? {
        return Err(AppError::not_found("Department", id));
    }
    tracing::info!(department_id = id, "Department member deleted");
    Ok(StatusCode::NO_CONTENT)
}
