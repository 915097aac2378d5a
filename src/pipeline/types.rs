//! Pipeline Types
//!
//! Core value types shared by every pipeline stage: the bucketing
//! granularity, the inclusive date range filter, and the aggregated series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-bucketing resolution selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per local calendar date
    Day,
    /// One bucket per week, floored to the configured week start
    Week,
    /// One bucket per local calendar month
    Month,
}

/// First day of the week used for week bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO convention, the default
    #[default]
    Monday,
    Sunday,
}

/// Inclusive date range, compared at day resolution in the dataset timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range covering `[start, end]`, both bounds inclusive
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the given local date falls inside the range.
    ///
    /// An inverted range (`start > end`) contains nothing, so filtering with
    /// one yields the ordinary empty outcome rather than an error.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One time-granularity slot with its event count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Bucket start date (the day itself, the week start, or the first of
    /// the month)
    pub key: NaiveDate,
    /// Occurrence tally, one per record
    pub count: u64,
}

/// Ordered sequence of buckets, ascending by key.
///
/// Regenerated in full on every (range, granularity) change and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedSeries {
    pub granularity: Granularity,
    pub buckets: Vec<Bucket>,
}

impl AggregatedSeries {
    /// Number of buckets in the series
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all bucket counts
    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}
