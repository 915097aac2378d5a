//! Detail enricher
//!
//! Derives display fields for each raw record in the detailed export:
//! weekday name, local time of day, and the same week label the Week table
//! uses. Pure and per-record, so row order never matters.

use crate::ingest::EventRecord;
use crate::pipeline::bucket::week_floor;
use crate::pipeline::table::week_label;
use crate::pipeline::types::WeekStart;

/// Derived display fields for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    /// Abbreviated weekday name in the record's timezone, e.g. `"Fri"`
    pub day_of_week: String,
    /// Local time of day, `HH:MM:SS`
    pub time: String,
    /// `"<week-start> to <week-end>"`, computed for every row regardless of
    /// the selected granularity
    pub week_period: String,
}

/// Compute the enrichment fields for a record
pub fn enrich(record: &EventRecord, week_start: WeekStart) -> Enrichment {
    let local_date = record.timestamp.date_naive();

    Enrichment {
        day_of_week: record.timestamp.format("%a").to_string(),
        time: record.timestamp.format("%H:%M:%S").to_string(),
        week_period: week_label(week_floor(local_date, week_start)),
    }
}
