//! `updatedAt` parsing and comparison
//!
//! Accepts RFC 3339 (what the endpoint emits) and the bare
//! `YYYY-MM-DD[T ]HH:MM:SS[.fff]` forms, read as UTC.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::errors::LiveLogError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 时间戳解析失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError {
    pub input: String,
    pub reason: String,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timestamp '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for TimestampError {}

impl From<TimestampError> for LiveLogError {
    fn from(err: TimestampError) -> Self {
        LiveLogError::timestamp_parse(err.to_string())
    }
}

pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();

    let rfc_err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(TimestampError {
        input: input.to_string(),
        reason: rfc_err.to_string(),
    })
}

/// `true` only when both parse and `incoming` is strictly later.
pub fn is_newer(incoming: &str, existing: &str) -> Result<bool, TimestampError> {
    Ok(parse_timestamp(incoming)? > parse_timestamp(existing)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_variants() {
        let a = parse_timestamp("2024-05-01T12:00:00Z").unwrap();
        let b = parse_timestamp("2024-05-01T12:00:00.000Z").unwrap();
        let c = parse_timestamp("2024-05-01T14:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let a = parse_timestamp("2024-05-01 12:00:00").unwrap();
        let b = parse_timestamp("2024-05-01T12:00:00.250").unwrap();
        assert_eq!(a, parse_timestamp("2024-05-01T12:00:00Z").unwrap());
        assert!(b > a);
    }

    #[test]
    fn test_parse_failure_keeps_input() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.input, "yesterday");
        assert!(err.to_string().contains("yesterday"));

        let converted: LiveLogError = err.into();
        assert_eq!(converted.code(), "E006");
    }

    #[test]
    fn test_is_newer_strict() {
        assert!(is_newer("2024-05-01T12:00:01Z", "2024-05-01T12:00:00Z").unwrap());
        assert!(!is_newer("2024-05-01T12:00:00Z", "2024-05-01T12:00:00Z").unwrap());
        assert!(!is_newer("2024-05-01T11:00:00Z", "2024-05-01T12:00:00Z").unwrap());
    }

    #[test]
    fn test_is_newer_errors_on_either_side() {
        assert!(is_newer("garbage", "2024-05-01T12:00:00Z").is_err());
        assert!(is_newer("2024-05-01T12:00:00Z", "").is_err());
    }
}
