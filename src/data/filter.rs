//! Row selection over a dataset: calendar date ranges and recent windows.
//!
//! Every function here borrows the input and returns a new [`Dataset`].

use std::time::Duration;

use chrono::{NaiveDate, TimeDelta};
use sensorwatch_types::Dataset;

use crate::error::InvalidRangeError;

/// Readings whose UTC calendar date lies in `[start, end]`.
///
/// An empty result is not an error. `start > end` is.
pub fn filter_by_date(
    dataset: &Dataset,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Dataset, InvalidRangeError> {
    if start > end {
        return Err(InvalidRangeError { start, end });
    }

    Ok(dataset
        .iter()
        .filter(|r| {
            let date = r.timestamp.date_naive();
            start <= date && date <= end
        })
        .copied()
        .collect())
}

/// Readings strictly newer than `max_timestamp - window`.
///
/// The window is anchored on the newest reading, not on the wall clock, so
/// an offline device still shows its last stretch of data.
pub fn tail_window(dataset: &Dataset, window: Duration) -> Dataset {
    let Some(newest) = dataset.last_seen() else {
        return Dataset::default();
    };

    let cutoff = TimeDelta::from_std(window)
        .ok()
        .and_then(|window| newest.checked_sub_signed(window));

    match cutoff {
        Some(cutoff) => dataset
            .iter()
            .filter(|r| r.timestamp > cutoff)
            .copied()
            .collect(),
        // Window reaches before the representable range: keep everything.
        None => dataset.clone(),
    }
}

/// The last `n` readings in arrival order; fewer if the dataset is shorter.
pub fn tail_n(dataset: &Dataset, n: usize) -> Dataset {
    let readings = dataset.readings();
    let start = readings.len().saturating_sub(n);
    Dataset::new(readings[start..].to_vec())
}
