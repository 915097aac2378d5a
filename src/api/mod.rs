//! Tally REST API
//!
//! HTTP hosting layer for the aggregation pipeline, built with Axum. Each
//! handler is a thin shell: resolve the session dataset, run the pure
//! pipeline, shape the response.
//!
//! # Endpoints
//!
//! ## Datasets
//! - `POST /api/v1/datasets` - Upload an event-log CSV
//! - `GET /api/v1/datasets/:id` - Dataset summary
//! - `DELETE /api/v1/datasets/:id` - Discard a dataset
//!
//! ## Series
//! - `GET /api/v1/datasets/:id/series` - Chart pairs and display table
//!
//! ## Export
//! - `GET /api/v1/datasets/:id/export/detailed` - Enriched CSV
//! - `GET /api/v1/datasets/:id/export/aggregated` - Display table CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    let api_routes = Router::new()
        .route("/datasets", post(routes::datasets::upload_dataset))
        .route("/datasets/:id", get(routes::datasets::get_dataset))
        .route("/datasets/:id", delete(routes::datasets::delete_dataset))
        .route("/datasets/:id/series", get(routes::series::get_series))
        .route(
            "/datasets/:id/export/detailed",
            get(routes::export::export_detailed),
        )
        .route(
            "/datasets/:id/export/aggregated",
            get(routes::export::export_aggregated),
        )
        .layer(DefaultBodyLimit::max(max_upload));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Tally API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Tally API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::WeekStart;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "tally-test-boundary";

    fn create_test_app() -> Router {
        let state = AppState::new(
            ApiConfig::default(),
            chrono_tz::Asia::Singapore,
            WeekStart::Monday,
        );
        build_router(state)
    }

    fn multipart_upload(csv_data: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"events.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = BOUNDARY,
            csv = csv_data
        );

        Request::builder()
            .method("POST")
            .uri("/api/v1/datasets")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn upload(app: &Router, csv_data: &str) -> String {
        let response = app
            .clone()
            .oneshot(multipart_upload(csv_data))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        json["dataset_id"].as_str().unwrap().to_string()
    }

    const SAMPLE_CSV: &str = "timestamp,user\n\
2024-03-04T09:00:00,alice\n\
2024-03-04T10:30:00,bob\n\
2024-03-05T09:00:00,alice\n";

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_and_series() {
        let app = create_test_app();
        let id = upload(&app, SAMPLE_CSV).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/datasets/{}/series?granularity=day&start=2024-03-01&end=2024-03-31",
                        id
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["status"], "ok");
        assert_eq!(json["chart"].as_array().unwrap().len(), 2);
        assert_eq!(json["chart"][0]["bucket"], "2024-03-04");
        assert_eq!(json["chart"][0]["count"], 2);
        assert_eq!(json["table"][0]["Date and Year Range"], "2024-03-04");
    }

    #[tokio::test]
    async fn test_series_empty_range_is_not_an_error() {
        let app = create_test_app();
        let id = upload(&app, SAMPLE_CSV).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/datasets/{}/series?granularity=day&start=2024-04-01&end=2024-04-30",
                        id
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["status"], "empty");
        assert!(json["chart"].as_array().unwrap().is_empty());
        assert!(json["table"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_missing_timestamp_column() {
        let app = create_test_app();

        let response = app
            .oneshot(multipart_upload("time,user\n2024-03-04T09:00:00,alice\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "SCHEMA_ERROR");
    }

    #[tokio::test]
    async fn test_upload_malformed_timestamp() {
        let app = create_test_app();

        let response = app
            .oneshot(multipart_upload("timestamp,user\n03/04/2024,alice\n"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_series_unknown_dataset() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/datasets/{}/series?granularity=day&start=2024-03-01&end=2024-03-31",
                        uuid::Uuid::new_v4()
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_detailed_export_download() {
        let app = create_test_app();
        let id = upload(&app, SAMPLE_CSV).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/datasets/{}/export/detailed", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );

        let body = body_string(response).await;
        assert!(body.starts_with("timestamp,user,day_of_week,time,week_period\n"));
        assert!(body.contains("2024-03-04T09:00:00,alice,Mon,09:00:00,2024-03-04 to 2024-03-10"));
    }

    #[tokio::test]
    async fn test_aggregated_export_download() {
        let app = create_test_app();
        let id = upload(&app, SAMPLE_CSV).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/api/v1/datasets/{}/export/aggregated?granularity=week&start=2024-03-01&end=2024-03-31",
                        id
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert_eq!(body, "Date and Year Range,count\n2024-03-04 to 2024-03-10,3\n");
    }

    #[tokio::test]
    async fn test_delete_dataset() {
        let app = create_test_app();
        let id = upload(&app, SAMPLE_CSV).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/datasets/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone afterwards
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/datasets/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
