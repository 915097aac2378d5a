//! # Tally
//!
//! Usage count analysis - a small Rust service that ingests event-log CSVs
//! and produces time-bucketed usage counts for charts, tables, and exports.
//!
//! ## Features
//!
//! - **Strict ingestion**: schema-checked CSV parsing, whole-file rejection
//!   on malformed timestamps
//! - **Temporal bucketing**: day / week / month buckets in a configured IANA
//!   timezone, with a configurable week start
//! - **Pure pipeline**: every (range, granularity) request recomputes
//!   immutable snapshots, so results are deterministic and trivially testable
//! - **Exports**: detailed (enriched per-record) and aggregated CSV downloads
//!
//! ## Modules
//!
//! - [`ingest`]: CSV parsing into an in-memory dataset
//! - [`pipeline`]: filter, bucket, aggregate, format, enrich
//! - [`export`]: CSV rendering of the two export artifacts
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use tally::ingest::Dataset;
//! use tally::pipeline::{self, DateRange, Granularity, PipelineOutput, WeekStart};
//! use chrono::NaiveDate;
//!
//! let csv_data = "timestamp,user\n2024-03-04T09:00:00,alice\n2024-03-05T10:00:00,bob\n";
//! let dataset = Dataset::from_reader(csv_data.as_bytes(), chrono_tz::Asia::Singapore)?;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//! );
//!
//! match pipeline::run(&dataset.records, &range, Granularity::Week, WeekStart::Monday) {
//!     PipelineOutput::Data { series, .. } => {
//!         println!("{} events in {} buckets", series.total_count(), series.len());
//!     }
//!     PipelineOutput::Empty => println!("no events in range"),
//! }
//! # Ok::<(), tally::ingest::IngestError>(())
//! ```

pub mod api;
pub mod config;
pub mod export;
pub mod ingest;
pub mod pipeline;

// Re-export top-level types for convenience
pub use ingest::{Dataset, EventRecord, IngestError, IngestResult};

pub use pipeline::{
    AggregatedSeries, Bucket, DateRange, DisplayRow, Granularity, PipelineOutput, WeekStart,
};

pub use export::{ExportError, ExportResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError};
