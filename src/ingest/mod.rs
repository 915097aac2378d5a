//! Event-log ingestion
//!
//! Parses an uploaded CSV into an in-memory [`Dataset`]. The file must carry
//! a column named exactly `timestamp`; every other column passes through
//! unchanged for the detailed export. The whole file is parsed at once and
//! the dataset is immutable after that.

pub mod error;
pub mod timestamp;

pub use error::{IngestError, IngestResult};
pub use timestamp::{parse_timestamp, ParseTimestampError};

use chrono::DateTime;
use chrono_tz::Tz;
use std::io::Read;
use std::path::Path;

/// Required timestamp column name, matched exactly
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Rows between coarse progress log lines during parsing
const PROGRESS_INTERVAL: usize = 10_000;

/// One parsed event row. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// The row's instant, resolved in the dataset timezone
    pub timestamp: DateTime<Tz>,
    /// Every original column value in header order, including the raw
    /// timestamp string
    pub fields: Vec<String>,
}

/// A fully parsed event log, private to one session
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Original column names in file order
    pub headers: Vec<String>,
    /// Index of the `timestamp` column within `headers`
    pub timestamp_column: usize,
    /// Parsed rows in file order
    pub records: Vec<EventRecord>,
    /// Timezone every timestamp was resolved in
    pub timezone: Tz,
}

impl Dataset {
    /// Parse an event-log CSV from any reader.
    ///
    /// Fails with [`IngestError::Schema`] before reading any row if the
    /// header lacks a `timestamp` column, and with [`IngestError::Timestamp`]
    /// on the first malformed value. There is no skip-bad-rows mode: partial
    /// silent loss would corrupt the count semantics downstream.
    pub fn from_reader<R: Read>(reader: R, timezone: Tz) -> IngestResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let timestamp_column = headers
            .iter()
            .position(|h| h == TIMESTAMP_COLUMN)
            .ok_or_else(|| {
                IngestError::Schema(format!(
                    "no '{}' column found (columns: {})",
                    TIMESTAMP_COLUMN,
                    headers.join(", ")
                ))
            })?;

        let mut records = Vec::new();

        for (row_idx, result) in csv_reader.records().enumerate() {
            // Header occupies line 1
            let line = row_idx + 2;
            let record = result?;

            let raw = record.get(timestamp_column).unwrap_or_default();
            let instant = parse_timestamp(raw, timezone)
                .map_err(|source| IngestError::Timestamp { line, source })?;

            records.push(EventRecord {
                timestamp: instant,
                fields: record.iter().map(str::to_string).collect(),
            });

            if records.len() % PROGRESS_INTERVAL == 0 {
                tracing::debug!(rows = records.len(), "parsing event log");
            }
        }

        tracing::info!(
            rows = records.len(),
            columns = headers.len(),
            timezone = %timezone,
            "event log parsed"
        );

        Ok(Self {
            headers,
            timestamp_column,
            records,
            timezone,
        })
    }

    /// Parse an event-log CSV from a file on disk
    pub fn from_path(path: &Path, timezone: Tz) -> IngestResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, timezone)
    }

    /// Number of parsed rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
