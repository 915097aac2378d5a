//! API Error Types
//!
//! Defines error types for the API layer and implements conversion to HTTP
//! responses with appropriate status codes. Schema and timestamp parse
//! failures carry distinct error codes so the UI can tell "wrong file" apart
//! from other bad requests. An empty filter result is not represented here
//! at all: it is a normal response, never an error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::export::ExportError;
use crate::ingest::IngestError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uploaded file was rejected during ingestion
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Export rendering failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Multipart upload could not be read
    #[error("Upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Ingest(IngestError::Schema(_)) => (StatusCode::BAD_REQUEST, "SCHEMA_ERROR"),
            ApiError::Ingest(IngestError::Timestamp { .. }) => {
                (StatusCode::BAD_REQUEST, "PARSE_ERROR")
            }
            ApiError::Ingest(_) => (StatusCode::BAD_REQUEST, "INGEST_ERROR"),
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR"),
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
