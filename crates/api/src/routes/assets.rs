use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Routes mounted at `/assets`.
///
/// ```text
/// DELETE /{id}            -> delete
/// GET    /{id}/preview    -> preview
/// GET    /{id}/file       -> file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(assets::delete))
        .route("/{id}/preview", get(assets::preview))
        .route("/{id}/file", get(assets::file))
}
