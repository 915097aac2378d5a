//! Application State
//!
//! Shared state accessible by all API handlers. Each uploaded dataset is
//! private to one session: stored under a fresh id, read as an immutable
//! snapshot, and discarded on delete.

use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ingest::Dataset;
use crate::pipeline::types::WeekStart;

/// Shared application state for all handlers
pub struct AppState {
    /// API configuration
    pub config: ApiConfig,
    /// Timezone uploaded timestamps are resolved in
    pub timezone: Tz,
    /// Week-start convention for week bucketing and labels
    pub week_start: WeekStart,
    /// In-memory session datasets, keyed by dataset id
    datasets: RwLock<HashMap<Uuid, Arc<Dataset>>>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with an empty session store
    pub fn new(config: ApiConfig, timezone: Tz, week_start: WeekStart) -> Self {
        Self {
            config,
            timezone,
            week_start,
            datasets: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Store a freshly parsed dataset, returning its id
    pub async fn insert_dataset(&self, dataset: Dataset) -> Uuid {
        let id = Uuid::new_v4();
        self.datasets.write().await.insert(id, Arc::new(dataset));
        id
    }

    /// Get an immutable snapshot of a dataset
    pub async fn get_dataset(&self, id: &Uuid) -> Option<Arc<Dataset>> {
        self.datasets.read().await.get(id).cloned()
    }

    /// Discard a session's dataset. Returns false if the id was unknown.
    pub async fn remove_dataset(&self, id: &Uuid) -> bool {
        self.datasets.write().await.remove(id).is_some()
    }

    /// Number of datasets currently held
    pub async fn dataset_count(&self) -> usize {
        self.datasets.read().await.len()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum upload size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8086,
            max_upload_bytes: 25 * 1024 * 1024, // 25 MB
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
