//! Export Routes
//!
//! CSV download endpoints.
//!
//! - GET /api/v1/datasets/:id/export/detailed - Every record plus enrichment
//! - GET /api/v1/datasets/:id/export/aggregated - The display table

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::AggregatedExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export;
use crate::pipeline::{self, DateRange, PipelineOutput};

/// GET /api/v1/datasets/:id/export/detailed
///
/// Granularity-independent: every original record with the three enrichment
/// columns appended.
pub async fn export_detailed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let dataset = state
        .get_dataset(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("dataset {}", id)))?;

    let body = export::detailed_csv(&dataset, state.week_start)?;

    Ok(csv_attachment("detailed", body))
}

/// GET /api/v1/datasets/:id/export/aggregated
///
/// The display table for the requested range and granularity. An empty range
/// downloads a header-only file, consistent with the empty state being
/// displayable rather than an error.
pub async fn export_aggregated(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<AggregatedExportParams>,
) -> ApiResult<Response> {
    let dataset = state
        .get_dataset(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("dataset {}", id)))?;

    let range = DateRange::new(params.start, params.end);
    let table = match pipeline::run(&dataset.records, &range, params.granularity, state.week_start)
    {
        PipelineOutput::Empty => Vec::new(),
        PipelineOutput::Data { table, .. } => table,
    };

    let body = export::aggregated_csv(&table, params.granularity)?;

    Ok(csv_attachment("aggregated", body))
}

/// Wrap a rendered CSV in an attachment response
fn csv_attachment(kind: &str, body: String) -> Response {
    let filename = format!(
        "tally_{}_{}.csv",
        kind,
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response()
}
