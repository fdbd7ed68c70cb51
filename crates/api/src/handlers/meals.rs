//! Handlers for the `/meals` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::options::{build_options, SelectOption};
use reelbook_core::scheduling::validate_meal_type;
use reelbook_core::types::DbId;
use reelbook_db::models::meal::{CreateMeal, Meal, MealEditView, UpdateMeal};
use reelbook_db::repositories::MealRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/meals
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMeal>,
) -> AppResult<(StatusCode, Json<DataResponse<Meal>>)> {
    if let Some(meal_type) = &input.meal_type {
        validate_meal_type(meal_type)?;
    }

    let store = state.store.lock().await;
    let meal = MealRepo::create(&store, &input)?;

    tracing::info!(meal_id = meal.id, date = %meal.date, meal_type = %meal.meal_type, "Meal created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: meal })))
}

/// GET /api/v1/meals
///
/// Sorted by date and time.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Meal>>>> {
    let store = state.store.lock().await;
    let meals = MealRepo::list(&store)?;
    Ok(Json(DataResponse { data: meals }))
}

/// GET /api/v1/meals/options
pub async fn options(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SelectOption>>>> {
    let store = state.store.lock().await;
    let meals = MealRepo::list(&store)?;
    let data = build_options(&meals, |m| m.id, |m| format!("{} {}", m.date, m.meal_type));
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/meals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Meal>>> {
    let store = state.store.lock().await;
    let meal = MealRepo::find_by_id(&store, id)?.ok_or_else(|| AppError::not_found("Meal", id))?;
    Ok(Json(DataResponse { data: meal }))
}

/// GET /api/v1/meals/{id}/edit
pub async fn edit_view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MealEditView>>> {
    let store = state.store.lock().await;
    let meal = MealRepo::find_by_id(&store, id)?.ok_or_else(|| AppError::not_found("Meal", id))?;
    Ok(Json(DataResponse {
        data: meal.edit_view(),
    }))
}

/// PUT /api/v1/meals/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMeal>,
) -> AppResult<Json<DataResponse<Meal>>> {
    if let Some(meal_type) = &input.meal_type {
        validate_meal_type(meal_type)?;
    }

    let store = state.store.lock().await;
    let meal = MealRepo::update(&store, id, &input)?
        .ok_or_else(|| AppError::not_found("Meal", id))?;

    tracing::info!(meal_id = id, "Meal updated");
    Ok(Json(DataResponse { data: meal }))
}

/// DELETE /api/v1/meals/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let store = state.store.lock().await;
    if !MealRepo::delete(&store, id)? {
        return Err(AppError::not_found("Meal", id));
    }
    tracing::info!(meal_id = id, "Meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
