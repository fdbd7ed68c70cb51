//! Route definitions for generic attachments.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::attachments;
use crate::state::AppState;

/// Routes mounted at `/attachments`.
///
/// The first segment is a record id or a module tag depending on the route;
/// it shares one parameter name so the router sees no conflict, and the
/// literal `preview` and `file` segments win over `{ref_id}`.
///
/// ```text
/// DELETE /{id}                 -> delete
/// GET    /{id}/preview         -> preview
/// GET    /{id}/file            -> file
/// GET    /{module}/{ref_id}    -> list
/// POST   /{module}/{ref_id}    -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(attachments::delete))
        .route("/{id}/preview", get(attachments::preview))
        .route("/{id}/file", get(attachments::file))
        .route(
            "/{id}/{ref_id}",
            get(attachments::list).post(attachments::upload),
        )
}
