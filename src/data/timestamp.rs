//! Timestamp parsing for the `time` column.
//!
//! Every accepted form is converted to UTC here, once. Values without an
//! offset are taken to already be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Formats carrying an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Formats without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601-like timestamp into UTC.
///
/// Returns `None` for anything that is not a recognizable date and time.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_rfc3339_zulu() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:10Z"), Some(utc(0, 0, 10)));
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(utc(0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01 03:30:00+03:30"),
            Some(utc(0, 0, 0))
        );
    }

    #[test]
    fn test_naive_is_taken_as_utc() {
        assert_eq!(parse_timestamp("2024-01-01 12:34:56"), Some(utc(12, 34, 56)));
        assert_eq!(parse_timestamp("2024-01-01T12:34:56"), Some(utc(12, 34, 56)));
        assert_eq!(parse_timestamp("2024-01-01 12:34"), Some(utc(12, 34, 0)));
        assert_eq!(parse_timestamp("2024-01-01"), Some(utc(0, 0, 0)));
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-01 00:00:01.250").unwrap();
        assert_eq!(parsed.timestamp_millis(), utc(0, 0, 1).timestamp_millis() + 250);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
        assert_eq!(parse_timestamp("20.5"), None);
    }
}
