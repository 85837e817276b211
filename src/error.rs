//! Error types for fetching, parsing, filtering and exporting.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when fetching a dataset from a source.
///
/// Fetch failures are never reported as an empty dataset: callers can tell
/// "the feed has no rows" apart from "the feed could not be read".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network error, non-200 status, or unreadable body/file.
    #[error("Source unreachable: {0}")]
    Unreachable(String),

    /// The source did not answer within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Map a reqwest error, using `timeout` for the `Timeout` variant.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Unreachable(err.to_string())
        }
    }
}

/// A row that could not be turned into a reading.
///
/// Row-level errors are non-fatal: the row is dropped and the rest of the
/// body still makes up the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Bad timestamp, bad number, or wrong number of fields.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

/// Date filter called with a start date after its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid date range: start {start} is after end {end}")]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Errors that can occur when writing a dataset out as CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FetchError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Request timed out after 10s");

        let err = ParseError::MalformedRow {
            line: 2,
            reason: "bad timestamp".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed row at line 2: bad timestamp");

        let err = InvalidRangeError {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert!(err.to_string().contains("2024-02-01"));
    }
}
