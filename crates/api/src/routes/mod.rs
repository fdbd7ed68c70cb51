pub mod assets;
pub mod attachments;
pub mod comparison;
pub mod departments;
pub mod editing_tasks;
pub mod health;
pub mod meals;
pub mod schedules;
pub mod scripts;
pub mod sites;
pub mod storyboards;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sites                               list, create
/// /sites/options                       id/label options
/// /sites/{id}                          get, update, delete (cascades assets)
/// /sites/{id}/edit                     prefilled edit view
/// /sites/{id}/assets                   list, upload (multipart)
///
/// /assets/{id}                         delete
/// /assets/{id}/preview                 preview descriptor
/// /assets/{id}/file                    stored bytes
///
/// /scripts                             list, create
/// /scripts/options                     id/label options
/// /scripts/{id}                        get, update, delete (cascades storyboards)
/// /scripts/{id}/edit                   prefilled edit view
/// /scripts/{id}/storyboards            list, create (multipart)
///
/// /storyboards                         list all
/// /storyboards/options                 id/label options
/// /storyboards/{id}                    get, update, delete
///
/// /departments, /schedules, /meals, /editing-tasks
///                                      list, create, options, get, update,
///                                      delete, edit
///
/// /attachments/{module}/{ref_id}       list, upload (multipart)
/// /attachments/{id}                    delete
/// /attachments/{id}/preview            preview descriptor
/// /attachments/{id}/file               stored bytes
///
/// /comparison/datasets                 upload CSV (multipart)
/// /comparison/datasets/{id}            column split and groups, delete
/// /comparison/datasets/{id}/report     charts, table, summary
/// /comparison/ask                      free-form question
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sites", sites::router())
        .nest("/assets", assets::router())
        .nest("/scripts", scripts::router())
        .nest("/storyboards", storyboards::router())
        .nest("/departments", departments::router())
        .nest("/schedules", schedules::router())
        .nest("/meals", meals::router())
        .nest("/editing-tasks", editing_tasks::router())
        .nest("/attachments", attachments::router())
        .nest("/comparison", comparison::router())
}
