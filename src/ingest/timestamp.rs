//! Timestamp parsing
//!
//! Event logs carry local timestamps with no UTC offset; the timezone is
//! deployment configuration, not part of the file. Parsing resolves each
//! string into a timezone-aware instant or rejects it.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

/// Accepted input shape: `YYYY-MM-DDTHH:MM:SS` with an optional fractional
/// second. `%.f` consumes the fraction including the leading dot, or nothing.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A timestamp value that does not match the expected format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid timestamp {0:?}, expected YYYY-MM-DDTHH:MM:SS[.fraction]")]
pub struct ParseTimestampError(pub String);

/// Parse a raw timestamp string into an instant in the given timezone.
///
/// Ambiguous local times (DST fall-back in zones that observe it) resolve to
/// the earlier instant; nonexistent local times are rejected.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Tz>, ParseTimestampError> {
    let raw = raw.trim();
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| ParseTimestampError(raw.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ParseTimestampError(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_basic() {
        let instant = parse_timestamp("2024-03-15T08:30:45", chrono_tz::Asia::Singapore).unwrap();

        assert_eq!(instant.hour(), 8);
        assert_eq!(instant.minute(), 30);
        assert_eq!(instant.second(), 45);
        assert_eq!(instant.date_naive().to_string(), "2024-03-15");
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let instant =
            parse_timestamp("2024-03-15T08:30:45.123456", chrono_tz::Asia::Singapore).unwrap();

        assert_eq!(instant.second(), 45);
        assert_eq!(instant.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp(" 2024-03-15T08:30:45 ", chrono_tz::Asia::Singapore).is_ok());
    }

    #[test]
    fn test_rejects_date_only() {
        assert!(parse_timestamp("2024-03-15", chrono_tz::Asia::Singapore).is_err());
    }

    #[test]
    fn test_rejects_explicit_offset() {
        // The offset comes from configuration, never from the file
        assert!(parse_timestamp("2024-03-15T08:30:45+08:00", chrono_tz::Asia::Singapore).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("not a timestamp", chrono_tz::Asia::Singapore).is_err());
        assert!(parse_timestamp("", chrono_tz::Asia::Singapore).is_err());
    }

    #[test]
    fn test_nonexistent_local_time_rejected() {
        // 02:30 does not exist on the US spring-forward date
        let result = parse_timestamp("2024-03-10T02:30:00", chrono_tz::America::New_York);
        assert!(result.is_err());
    }
}
