//! Handlers for the product comparison dashboard.
//!
//! Datasets live in memory only, oldest evicted first once the configured
//! count is reached; nothing here touches the record store.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use reelbook_core::comparison::{
    build_summary_prompt, chart_specs, comparison_table, select, ChartSpec, ComparisonTable,
    Dataset, DatasetSummary, Selection,
};
use reelbook_core::validation::require_non_empty;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::overlays::attach_overlays;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::collect_form;

// ----- Payloads -----

/// Returned after a dataset upload and by the dataset lookup.
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub id: Uuid,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}

/// Charts, table and optional summary for one selection.
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub charts: Vec<ChartSpec>,
    pub table: Option<ComparisonTable>,
    /// Raw text-generation reply, present only when requested and columns were chosen.
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

// ----- Handlers -----

/// POST /api/v1/comparison/datasets
///
/// Multipart form with one CSV file part.
pub async fn upload_dataset(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<DatasetInfo>>)> {
    let form = collect_form(multipart).await?;
    let file = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest("Missing CSV file".into()))?;

    let dataset = Dataset::from_csv(&file.bytes)?;
    let summary = dataset.summary();
    let id = Uuid::new_v4();
    let evicted = state.datasets.write().await.insert(id, dataset);
    for old in &evicted {
        tracing::info!(dataset_id = %old, "Comparison dataset evicted");
    }

    tracing::info!(
        dataset_id = %id,
        file_name = %file.file_name,
        rows = summary.row_count,
        numeric_columns = summary.numeric_columns.len(),
        text_columns = summary.text_columns.len(),
        "Comparison dataset uploaded"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DatasetInfo { id, summary },
        }),
    ))
}

/// GET /api/v1/comparison/datasets/{id}
pub async fn get_dataset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<DatasetInfo>>> {
    let datasets = state.datasets.read().await;
    let dataset = datasets.get(&id).ok_or_else(|| dataset_not_found(id))?;
    Ok(Json(DataResponse {
        data: DatasetInfo {
            id,
            summary: dataset.summary(),
        },
    }))
}

/// DELETE /api/v1/comparison/datasets/{id}
pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.datasets.write().await.remove(&id) {
        return Err(dataset_not_found(id));
    }
    tracing::info!(dataset_id = %id, "Comparison dataset deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/comparison/datasets/{id}/report
///
/// Choosing no numeric and no text columns yields an empty report and skips
/// summarisation even when it was requested.
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(selection): Json<Selection>,
) -> AppResult<Json<DataResponse<ComparisonReport>>> {
    let (mut charts, table, prompt) = {
        let datasets = state.datasets.read().await;
        let dataset = datasets.get(&id).ok_or_else(|| dataset_not_found(id))?;
        let slice = select(dataset, &selection)?;

        if !slice.has_columns() {
            tracing::debug!(dataset_id = %id, "No columns selected, empty report");
            return Ok(Json(DataResponse {
                data: ComparisonReport {
                    charts: Vec::new(),
                    table: None,
                    summary: None,
                },
            }));
        }

        let prompt = if selection.summarize {
            Some(build_summary_prompt(dataset, &slice)?)
        } else {
            None
        };
        (
            chart_specs(dataset, &slice),
            comparison_table(dataset, &slice),
            prompt,
        )
    };

    attach_overlays(&state.http, &mut charts).await;

    let summary = match prompt {
        Some(prompt) => Some(state.textgen.complete(&prompt).await?),
        None => None,
    };

    tracing::info!(
        dataset_id = %id,
        charts = charts.len(),
        summarized = summary.is_some(),
        "Comparison report built"
    );
    Ok(Json(DataResponse {
        data: ComparisonReport {
            charts,
            table,
            summary,
        },
    }))
}

/// POST /api/v1/comparison/ask
///
/// Each question is sent on its own; earlier questions are not remembered.
pub async fn ask(
    State(state): State<AppState>,
    Json(input): Json<AskRequest>,
) -> AppResult<Json<DataResponse<AskResponse>>> {
    require_non_empty("question", &input.question)?;
    let answer = state.textgen.complete(input.question.trim()).await?;
    Ok(Json(DataResponse {
        data: AskResponse { answer },
    }))
}

fn dataset_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Comparison dataset {id} not found"))
}
