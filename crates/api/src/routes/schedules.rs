use axum::routing::get;
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
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
        .route("/", get(schedules::list).post(schedules::create))
        .route("/options", get(schedules::options))
        .route(
            "/{id}",
            get(schedules::get_by_id)
                .put(schedules::update)
                .delete(schedules::delete),
        )
        .route("/{id}/edit", get(schedules::edit_view))
}
