//! Dataset Routes
//!
//! Upload, inspect, and discard session datasets.
//!
//! - POST /api/v1/datasets - Upload an event-log CSV (multipart field `file`)
//! - GET /api/v1/datasets/:id - Dataset summary
//! - DELETE /api/v1/datasets/:id - Discard a dataset

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{DatasetSummary, UploadResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::ingest::Dataset;

/// POST /api/v1/datasets
///
/// Parse the uploaded CSV in full. A missing `timestamp` column or a single
/// malformed timestamp rejects the whole file with a coded error; nothing is
/// stored in that case.
pub async fn upload_dataset(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            data = Some(field.bytes().await?.to_vec());
        }
    }

    let data = data.ok_or_else(|| {
        ApiError::Validation("multipart field 'file' is required".to_string())
    })?;

    let dataset = Dataset::from_reader(data.as_slice(), state.timezone)?;

    let rows = dataset.len();
    let headers = dataset.headers.clone();
    let dataset_id = state.insert_dataset(dataset).await;

    tracing::info!(dataset_id = %dataset_id, rows, "dataset uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            dataset_id,
            rows,
            headers,
        }),
    ))
}

/// GET /api/v1/datasets/:id
pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DatasetSummary>> {
    let dataset = state
        .get_dataset(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("dataset {}", id)))?;

    Ok(Json(DatasetSummary {
        dataset_id: id,
        rows: dataset.len(),
        headers: dataset.headers.clone(),
        timezone: dataset.timezone.to_string(),
    }))
}

/// DELETE /api/v1/datasets/:id
///
/// Ends the session: the dataset is dropped from memory.
pub async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.remove_dataset(&id).await {
        tracing::info!(dataset_id = %id, "dataset discarded");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("dataset {}", id)))
    }
}
