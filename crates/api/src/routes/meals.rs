use axum::routing::get;
use axum::Router;

use crate::handlers::meals;
use crate::state::AppState;

/// Routes mounted at `/meals`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /options       -> options
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/edit     -> edit_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meals::list).post(meals::create))
        .route("/options", get(meals::options))
        .route(
            "/{id}",
            get(meals::get_by_id)
                .put(meals::update)
                .delete(meals::delete),
        )
        .route("/{id}/edit", get(meals::edit_view))
}
