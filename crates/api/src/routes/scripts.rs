//! Route definitions for the `/scripts` resource, including the
//! script-scoped storyboard collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::{scripts, storyboards};
use crate::state::AppState;

/// Routes mounted at `/scripts`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /options                 -> options
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/edit               -> edit_view
/// GET    /{id}/storyboards        -> storyboards::list_by_script
/// POST   /{id}/storyboards        -> storyboards::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scripts::list).post(scripts::create))
        .route("/options", get(scripts::options))
        .route(
            "/{id}",
            get(scripts::get_by_id)
                .put(scripts::update)
                .delete(scripts::delete),
        )
        .route("/{id}/edit", get(scripts::edit_view))
        .route(
            "/{id}/storyboards",
            get(storyboards::list_by_script).post(storyboards::create),
        )
}
