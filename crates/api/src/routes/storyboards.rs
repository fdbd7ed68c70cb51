use axum::routing::get;
use axum::Router;

use crate::handlers::storyboards;
use crate::state::AppState;

/// Routes mounted at `/storyboards`.
///
/// ```text
/// GET    /            -> list
/// GET    /options     -> options
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update
/// DELETE /{id}        -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(storyboards::list))
        .route("/options", get(storyboards::options))
        .route(
            "/{id}",
            get(storyboards::get_by_id)
                .put(storyboards::update)
                .delete(storyboards::delete),
        )
}
