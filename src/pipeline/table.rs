//! Table formatter
//!
//! Projects an aggregated series into display rows with granularity-specific
//! labeled columns, for the on-screen table and the aggregated export.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::pipeline::types::{AggregatedSeries, Granularity};

/// Day and week rows share one shape: a period label plus the count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodRow {
    /// ISO date for day buckets, `"<start> to <end>"` for week buckets
    #[serde(rename = "Date and Year Range")]
    pub period: String,
    pub count: u64,
}

/// Month rows break the label into year, month name, and full date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRow {
    #[serde(rename = "Year")]
    pub year: i32,
    /// Abbreviated month and year, e.g. `"Feb 2024"`
    #[serde(rename = "Month")]
    pub month: String,
    /// `"<first-of-month> to <last-of-month>"`
    #[serde(rename = "Date Range")]
    pub date_range: String,
    pub count: u64,
}

/// A formatted, human-labeled projection of one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DisplayRow {
    Period(PeriodRow),
    Month(MonthRow),
}

impl DisplayRow {
    /// The bucket count regardless of row shape
    pub fn count(&self) -> u64 {
        match self {
            DisplayRow::Period(row) => row.count,
            DisplayRow::Month(row) => row.count,
        }
    }
}

/// `"<week-start> to <week-start+6d>"`, shared with the detail enricher
pub fn week_label(week_start_date: NaiveDate) -> String {
    format!("{} to {}", week_start_date, week_start_date + Duration::days(6))
}

/// Last day of the month starting at `first`, computed as
/// `first + 1 month - 1 day` so month lengths and leap years fall out of the
/// calendar arithmetic.
pub fn month_last_day(first: NaiveDate) -> NaiveDate {
    // Adding one month to a first-of-month date cannot overflow the calendar
    // until year 262143, and its predecessor always exists
    first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap()
}

/// Render the series into display rows, ordered like the series (ascending
/// by bucket key).
pub fn format_table(series: &AggregatedSeries) -> Vec<DisplayRow> {
    series
        .buckets
        .iter()
        .map(|bucket| match series.granularity {
            Granularity::Day => DisplayRow::Period(PeriodRow {
                period: bucket.key.to_string(),
                count: bucket.count,
            }),
            Granularity::Week => DisplayRow::Period(PeriodRow {
                period: week_label(bucket.key),
                count: bucket.count,
            }),
            Granularity::Month => DisplayRow::Month(MonthRow {
                year: bucket.key.year(),
                month: bucket.key.format("%b %Y").to_string(),
                date_range: format!("{} to {}", bucket.key, month_last_day(bucket.key)),
                count: bucket.count,
            }),
        })
        .collect()
}
