//! CSV export
//!
//! Renders the two downloadable artifacts: the detailed export (every
//! original record plus the enrichment fields) and the aggregated export
//! (the display table). Both are row-oriented CSV built with the `csv`
//! writer so passthrough fields keep correct quoting.

use thiserror::Error;

use crate::ingest::Dataset;
use crate::pipeline::enrich::enrich;
use crate::pipeline::table::DisplayRow;
use crate::pipeline::types::{Granularity, WeekStart};

/// Column names appended to the original headers in the detailed export
pub const ENRICHMENT_COLUMNS: [&str; 3] = ["day_of_week", "time", "week_period"];

/// Errors that can occur while rendering an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

fn finish(writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the detailed export: every original column in file order, followed
/// by the three enrichment columns. Granularity-independent.
pub fn detailed_csv(dataset: &Dataset, week_start: WeekStart) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = dataset.headers.iter().map(String::as_str).collect();
    header.extend(ENRICHMENT_COLUMNS);
    writer.write_record(&header)?;

    for record in &dataset.records {
        let enrichment = enrich(record, week_start);
        let mut row: Vec<&str> = record.fields.iter().map(String::as_str).collect();
        row.push(&enrichment.day_of_week);
        row.push(&enrichment.time);
        row.push(&enrichment.week_period);
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Render the aggregated export: the display table with its
/// granularity-specific header. An empty table produces a header-only file.
pub fn aggregated_csv(table: &[DisplayRow], granularity: Granularity) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match granularity {
        Granularity::Day | Granularity::Week => {
            writer.write_record(["Date and Year Range", "count"])?;
            for row in table {
                if let DisplayRow::Period(row) = row {
                    let count = row.count.to_string();
                    writer.write_record([row.period.as_str(), count.as_str()])?;
                }
            }
        }
        Granularity::Month => {
            writer.write_record(["Year", "Month", "Date Range", "count"])?;
            for row in table {
                if let DisplayRow::Month(row) = row {
                    let year = row.year.to_string();
                    let count = row.count.to_string();
                    writer.write_record([
                        year.as_str(),
                        row.month.as_str(),
                        row.date_range.as_str(),
                        count.as_str(),
                    ])?;
                }
            }
        }
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{aggregate, filter_range, format_table, DateRange};
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let csv_data = "timestamp,user,action
2024-03-15T08:05:09,alice,login
2024-03-16T22:10:00,bob,\"export, full\"";
        Dataset::from_reader(csv_data.as_bytes(), chrono_tz::Asia::Singapore).unwrap()
    }

    #[test]
    fn test_detailed_export_appends_enrichment() {
        let csv_out = detailed_csv(&dataset(), WeekStart::Monday).unwrap();
        let mut lines = csv_out.lines();

        assert_eq!(
            lines.next().unwrap(),
            "timestamp,user,action,day_of_week,time,week_period"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-15T08:05:09,alice,login,Fri,08:05:09,2024-03-11 to 2024-03-17"
        );
        // Passthrough field with a comma stays quoted
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-16T22:10:00,bob,\"export, full\",Sat,22:10:00,2024-03-11 to 2024-03-17"
        );
    }

    #[test]
    fn test_aggregated_export_week() {
        let ds = dataset();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let kept = filter_range(&ds.records, &range);
        let series = aggregate(kept, Granularity::Week, WeekStart::Monday);
        let table = format_table(&series);

        let csv_out = aggregated_csv(&table, Granularity::Week).unwrap();

        assert_eq!(csv_out, "Date and Year Range,count\n2024-03-11 to 2024-03-17,2\n");
    }

    #[test]
    fn test_aggregated_export_month_header() {
        let csv_out = aggregated_csv(&[], Granularity::Month).unwrap();
        assert_eq!(csv_out, "Year,Month,Date Range,count\n");
    }

    #[test]
    fn test_aggregated_export_empty_is_header_only() {
        let csv_out = aggregated_csv(&[], Granularity::Day).unwrap();
        assert_eq!(csv_out, "Date and Year Range,count\n");
    }
}
