//! Range filter
//!
//! Retains records whose local date falls inside the inclusive `[start, end]`
//! range. An empty result is a normal, displayable state.

use crate::ingest::EventRecord;
use crate::pipeline::types::DateRange;

/// Filter records to the inclusive date range, compared at day resolution
/// using each record's local date.
pub fn filter_range<'a>(records: &'a [EventRecord], range: &DateRange) -> Vec<&'a EventRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.timestamp.date_naive()))
        .collect()
}
