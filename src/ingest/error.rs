//! Ingestion error types
//!
//! A malformed file is rejected wholesale: a missing `timestamp` column or a
//! single unparseable timestamp aborts the ingestion with one user-facing
//! error, never a partial "skip bad rows" result.

use thiserror::Error;

use super::timestamp::ParseTimestampError;

/// Errors that can occur while ingesting an event-log CSV
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file is structurally wrong for this tool, detected before any
    /// row is parsed
    #[error("Schema error: {0}")]
    Schema(String),

    /// A timestamp value does not conform to the expected format
    #[error("Parse error at line {line}: {source}")]
    Timestamp {
        line: usize,
        source: ParseTimestampError,
    },

    /// CSV reader failure (malformed quoting, ragged rows)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;
