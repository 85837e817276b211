//! Device liveness evaluation.
//!
//! The device is considered online while its most recent reading is younger
//! than a caller-supplied threshold. All arithmetic happens in UTC.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sensorwatch_types::{Dataset, DeviceStatus, Liveness};

/// Default offline threshold.
pub const DEFAULT_OFFLINE_AFTER: Duration = Duration::from_secs(30);

/// Compute the device status of `dataset` at `now`.
pub fn status_of<Tz: TimeZone>(
    dataset: &Dataset,
    now: DateTime<Tz>,
    threshold: Duration,
) -> DeviceStatus {
    liveness(dataset, now, threshold).status
}

/// Compute the device status together with the last-seen timestamp.
///
/// `now` may be in any time zone; it is converted to UTC before comparing.
/// A last reading in the future of `now` (clock skew) counts as online.
pub fn liveness<Tz: TimeZone>(
    dataset: &Dataset,
    now: DateTime<Tz>,
    threshold: Duration,
) -> Liveness {
    let Some(last_seen) = dataset.last_seen() else {
        return Liveness::unknown();
    };

    let elapsed = now.with_timezone(&Utc).signed_duration_since(last_seen);
    let online = match TimeDelta::from_std(threshold) {
        Ok(threshold) => elapsed < threshold,
        // Threshold beyond the representable range: nothing is ever stale.
        Err(_) => true,
    };

    Liveness {
        status: if online {
            DeviceStatus::Online
        } else {
            DeviceStatus::Offline
        },
        last_seen: Some(last_seen),
    }
}

/// Time elapsed between the last reading and `now`, if there is a reading.
pub fn age<Tz: TimeZone>(dataset: &Dataset, now: DateTime<Tz>) -> Option<TimeDelta> {
    dataset
        .last_seen()
        .map(|last_seen| now.with_timezone(&Utc).signed_duration_since(last_seen))
}
