//! Reading - one sample from the sensor feed.

use chrono::{DateTime, Utc};

/// A single temperature/humidity sample.
///
/// The timestamp is always UTC. Rows whose timestamp cannot be parsed never
/// become a `Reading`, so every reading takes part in recency comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// When the sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl Reading {
    /// Create a new reading.
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
        }
    }
}
