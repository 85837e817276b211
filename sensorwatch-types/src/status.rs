//! Device liveness derived from the most recent reading.

use core::fmt;

use chrono::{DateTime, Utc};

/// Whether the device is still reporting.
///
/// Derived on every evaluation from a dataset and the current time; never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceStatus {
    /// The last reading is younger than the offline threshold.
    Online,
    /// The last reading is at least as old as the offline threshold.
    Offline,
    /// There is no reading to judge by.
    Unknown,
}

impl DeviceStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "ON",
            DeviceStatus::Offline => "OFF",
            DeviceStatus::Unknown => "??",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "Online",
            DeviceStatus::Offline => "Offline",
            DeviceStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A device status together with the timestamp it was judged by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liveness {
    pub status: DeviceStatus,
    /// Most recent reading timestamp, `None` when the status is `Unknown`.
    pub last_seen: Option<DateTime<Utc>>,
}

impl Liveness {
    /// Liveness of a dataset with no readings.
    pub const fn unknown() -> Self {
        Self {
            status: DeviceStatus::Unknown,
            last_seen: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DeviceStatus::Online.to_string(), "Online");
        assert_eq!(DeviceStatus::Offline.symbol(), "OFF");
        assert_eq!(Liveness::unknown().status, DeviceStatus::Unknown);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_status() {
        let json = serde_json::to_string(&DeviceStatus::Offline).unwrap();
        assert_eq!(json, "\"offline\"");
    }
}
