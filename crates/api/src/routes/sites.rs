//! Route definitions for the `/sites` resource.
//!
//! Also nests the site's material assets under `/sites/{site_id}/assets`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{assets, sites};
use crate::state::AppState;

/// Routes mounted at `/sites`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /options               -> options
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// GET    /{id}/edit             -> edit_view
/// GET    /{site_id}/assets      -> assets::list_by_site
/// POST   /{site_id}/assets      -> assets::upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sites::list).post(sites::create))
        .route("/options", get(sites::options))
        .route(
            "/{id}",
            get(sites::get_by_id)
                .put(sites::update)
                .delete(sites::delete),
        )
        .route("/{id}/edit", get(sites::edit_view))
        .route(
            "/{id}/assets",
            get(assets::list_by_site).post(assets::upload),
        )
}
