//! Temporal aggregation pipeline
//!
//! Pure transforms from a parsed event log to chart- and table-ready usage
//! counts:
//!
//! ```text
//! records → filter → bucket + aggregate → { series (chart), table }
//! ```
//!
//! Every stage returns a new immutable value; the hosting layer recomputes
//! the whole pipeline deterministically whenever the range or granularity
//! changes. There is no hidden state and no incremental patching.

pub mod aggregate;
pub mod bucket;
pub mod enrich;
pub mod filter;
pub mod table;
pub mod types;

pub use aggregate::aggregate;
pub use bucket::{bucket_key, week_floor};
pub use enrich::{enrich, Enrichment};
pub use filter::filter_range;
pub use table::{format_table, month_last_day, week_label, DisplayRow, MonthRow, PeriodRow};
pub use types::{AggregatedSeries, Bucket, DateRange, Granularity, WeekStart};

use crate::ingest::EventRecord;

/// Result of one pipeline invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutput {
    /// No records fell inside the range. A valid terminal state the caller
    /// renders as "no data", distinct from every error.
    Empty,
    /// Aggregated usage counts for the selected range and granularity
    Data {
        series: AggregatedSeries,
        table: Vec<DisplayRow>,
    },
}

/// Run the full pipeline over a dataset's records for one
/// (range, granularity) selection.
pub fn run(
    records: &[EventRecord],
    range: &DateRange,
    granularity: Granularity,
    week_start: WeekStart,
) -> PipelineOutput {
    let in_range = filter::filter_range(records, range);

    if in_range.is_empty() {
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            "no records in range"
        );
        return PipelineOutput::Empty;
    }

    let series = aggregate::aggregate(in_range, granularity, week_start);
    let table = table::format_table(&series);

    PipelineOutput::Data { series, table }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_timestamp;
    use chrono::NaiveDate;

    fn record(raw: &str) -> EventRecord {
        EventRecord {
            timestamp: parse_timestamp(raw, chrono_tz::Asia::Singapore).unwrap(),
            fields: vec![raw.to_string()],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_run() {
        let records = vec![
            record("2024-03-04T09:00:00"),
            record("2024-03-04T10:00:00"),
            record("2024-03-05T09:00:00"),
            record("2024-05-01T09:00:00"), // outside range
        ];
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));

        let output = run(&records, &range, Granularity::Day, WeekStart::Monday);

        match output {
            PipelineOutput::Data { series, table } => {
                assert_eq!(series.total_count(), 3);
                assert_eq!(series.len(), 2);
                assert_eq!(table.len(), 2);
            }
            PipelineOutput::Empty => panic!("expected data"),
        }
    }

    #[test]
    fn test_march_records_april_range_is_empty() {
        let records = vec![record("2024-03-04T09:00:00"), record("2024-03-20T09:00:00")];
        let range = DateRange::new(date(2024, 4, 1), date(2024, 4, 30));

        let output = run(&records, &range, Granularity::Day, WeekStart::Monday);

        assert_eq!(output, PipelineOutput::Empty);
    }

    #[test]
    fn test_deterministic() {
        let records = vec![
            record("2024-03-04T09:00:00"),
            record("2024-03-11T09:00:00"),
            record("2024-03-18T09:00:00"),
        ];
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31));

        let first = run(&records, &range, Granularity::Week, WeekStart::Monday);
        let second = run(&records, &range, Granularity::Week, WeekStart::Monday);

        assert_eq!(first, second);
    }
}
