//! Bucket key derivation
//!
//! Maps an instant to its bucket start date for a given granularity. Keys are
//! computed from the local calendar date, so identical instants always yield
//! identical keys and grouping stays deterministic.

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::pipeline::types::{Granularity, WeekStart};

/// Floor a date to the start of its week
pub fn week_floor(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let days_into_week = match week_start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(days_into_week))
}

/// Derive the bucket key for an instant at the given granularity
pub fn bucket_key(instant: &DateTime<Tz>, granularity: Granularity, week_start: WeekStart) -> NaiveDate {
    let date = instant.date_naive();
    match granularity {
        Granularity::Day => date,
        Granularity::Week => week_floor(date, week_start),
        // Day 1 exists in every month
        Granularity::Month => date.with_day(1).unwrap(),
    }
}
