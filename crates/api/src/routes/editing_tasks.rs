use axum::routing::get;
use axum::Router;

use crate::handlers::editing_tasks;
use crate::state::AppState;

/// Routes mounted at `/editing-tasks`.
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
        .route("/", get(editing_tasks::list).post(editing_tasks::create))
        .route("/options", get(editing_tasks::options))
        .route(
            "/{id}",
            get(editing_tasks::get_by_id)
                .put(editing_tasks::update)
                .delete(editing_tasks::delete),
        )
        .route("/{id}/edit", get(editing_tasks::edit_view))
}
