//! Series Routes
//!
//! The chart/table endpoint. Each request recomputes the full pipeline over
//! the dataset snapshot for the requested range and granularity.
//!
//! - GET /api/v1/datasets/:id/series

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{ChartPoint, DisplaySettings, SeriesParams, SeriesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pipeline::{self, DateRange, PipelineOutput};

/// GET /api/v1/datasets/:id/series
///
/// Returns ordered (bucket, count) chart pairs plus the display table.
/// When no records fall in the range the response has `status: "empty"`
/// with empty arrays; that is the caller's cue to render a no-data state
/// rather than a failure.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<SeriesParams>,
) -> ApiResult<Json<SeriesResponse>> {
    let dataset = state
        .get_dataset(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("dataset {}", id)))?;

    let range = DateRange::new(params.start, params.end);
    let display = display_settings(&params);

    let output = pipeline::run(&dataset.records, &range, params.granularity, state.week_start);

    let response = match output {
        PipelineOutput::Empty => SeriesResponse {
            status: "empty".to_string(),
            granularity: params.granularity,
            chart: Vec::new(),
            table: Vec::new(),
            display,
        },
        PipelineOutput::Data { series, table } => SeriesResponse {
            status: "ok".to_string(),
            granularity: params.granularity,
            chart: series
                .buckets
                .iter()
                .map(|b| ChartPoint {
                    bucket: b.key,
                    count: b.count,
                })
                .collect(),
            table,
            display,
        },
    };

    Ok(Json(response))
}

/// Chart-only settings pass straight through; they never touch the data.
fn display_settings(params: &SeriesParams) -> DisplaySettings {
    DisplaySettings {
        floor_line: params.floor_line.unwrap_or(0.0),
        axis_range: match (params.axis_min, params.axis_max) {
            (Some(min), Some(max)) => Some([min, max]),
            _ => None,
        },
    }
}
