//! Aggregator
//!
//! Groups filtered records by bucket key and counts occurrences. A `BTreeMap`
//! keyed by bucket date gives the ascending chronological order for free.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ingest::EventRecord;
use crate::pipeline::bucket::bucket_key;
use crate::pipeline::types::{AggregatedSeries, Bucket, Granularity, WeekStart};

/// Count records per bucket, emitting one bucket per distinct key, sorted
/// ascending. Empty input yields an empty series, not an error.
pub fn aggregate<'a, I>(records: I, granularity: Granularity, week_start: WeekStart) -> AggregatedSeries
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for record in records {
        let key = bucket_key(&record.timestamp, granularity, week_start);
        *counts.entry(key).or_default() += 1;
    }

    AggregatedSeries {
        granularity,
        buckets: counts
            .into_iter()
            .map(|(key, count)| Bucket { key, count })
            .collect(),
    }
}
