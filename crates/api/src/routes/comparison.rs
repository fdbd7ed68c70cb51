use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comparison;
use crate::state::AppState;

/// Routes mounted at `/comparison`.
///
/// ```text
/// POST   /datasets                -> upload_dataset
/// GET    /datasets/{id}           -> get_dataset
/// DELETE /datasets/{id}           -> delete_dataset
/// POST   /datasets/{id}/report    -> report
/// POST   /ask                     -> ask
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/datasets", post(comparison::upload_dataset))
        .route(
            "/datasets/{id}",
            get(comparison::get_dataset).delete(comparison::delete_dataset),
        )
        .route("/datasets/{id}/report", post(comparison::report))
        .route("/ask", post(comparison::ask))
}
