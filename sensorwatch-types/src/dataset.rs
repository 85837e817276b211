//! Dataset - the readings returned by one fetch.

use std::slice;

use chrono::{DateTime, Utc};

use crate::Reading;

/// An ordered collection of readings, in the order the feed delivered them.
///
/// The feed is append-only in practice, but nothing guarantees the rows are
/// sorted by timestamp, so recency queries scan for the maximum instead of
/// trusting the last row.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dataset {
    readings: Vec<Reading>,
}

impl Dataset {
    /// Create a dataset from readings in arrival order.
    pub fn new(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Check if the dataset has no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// The readings as a slice, in arrival order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Iterate over readings in arrival order.
    pub fn iter(&self) -> slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// The last reading in arrival order.
    ///
    /// This is what a "current value" display shows; for recency use
    /// [`Dataset::last_seen`].
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// The most recent timestamp in the dataset.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.readings.iter().map(|r| r.timestamp).max()
    }

    /// Consume the dataset, returning the readings.
    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }
}

impl From<Vec<Reading>> for Dataset {
    fn from(readings: Vec<Reading>) -> Self {
        Self::new(readings)
    }
}

impl FromIterator<Reading> for Dataset {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Reading;
    type IntoIter = slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

impl IntoIterator for Dataset {
    type Item = Reading;
    type IntoIter = std::vec::IntoIter<Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}
