//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON and query strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::table::DisplayRow;
use crate::pipeline::types::Granularity;

// ============================================
// DATASET DTOs
// ============================================

/// Response after a successful CSV upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Id to use for series and export requests
    pub dataset_id: Uuid,
    /// Number of parsed rows
    pub rows: usize,
    /// Original column names in file order
    pub headers: Vec<String>,
}

/// Dataset summary
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub dataset_id: Uuid,
    pub rows: usize,
    pub headers: Vec<String>,
    /// Timezone the timestamps were resolved in
    pub timezone: String,
}

// ============================================
// SERIES DTOs
// ============================================

/// Query parameters for a series/table request
#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    pub granularity: Granularity,
    /// Inclusive range start (ISO date)
    pub start: NaiveDate,
    /// Inclusive range end (ISO date)
    pub end: NaiveDate,
    /// Horizontal reference line for the chart; display-only
    #[serde(default)]
    pub floor_line: Option<f64>,
    /// Chart y-axis minimum; display-only
    #[serde(default)]
    pub axis_min: Option<f64>,
    /// Chart y-axis maximum; display-only
    #[serde(default)]
    pub axis_max: Option<f64>,
}

/// One chart point: bucket start date and its count
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub bucket: NaiveDate,
    pub count: u64,
}

/// Display-only settings echoed back for the chart renderer.
/// These never affect the aggregated data.
#[derive(Debug, Serialize)]
pub struct DisplaySettings {
    pub floor_line: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_range: Option<[f64; 2]>,
}

/// Series response: chart pairs plus the display table.
///
/// `status` is `"ok"` when buckets exist and `"empty"` when no records fell
/// in the range; the empty state is a normal response, not an error.
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub status: String,
    pub granularity: Granularity,
    pub chart: Vec<ChartPoint>,
    pub table: Vec<DisplayRow>,
    pub display: DisplaySettings,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Query parameters for the aggregated export
#[derive(Debug, Deserialize)]
pub struct AggregatedExportParams {
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Number of in-memory session datasets
    pub datasets: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
