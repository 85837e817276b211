//! # sensorwatch-types
//!
//! Core types shared by the sensorwatch fetcher, evaluator and any
//! presentation layer built on top of them.
//!
//! ## Design Goals
//!
//! - **One time reference**: every timestamp is a `DateTime<Utc>`; conversion
//!   happens once, when a reading is ingested
//! - **Immutable snapshots**: a [`Dataset`] is built once per fetch and only
//!   ever borrowed or filtered into a new `Dataset`
//! - **Optional serialization**: enable the `serde` feature as needed
//!
//! ## Features
//!
//! - `serde`: JSON/etc. serialization via serde (timestamps as RFC 3339)
//!
//! ## Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use sensorwatch_types::{Dataset, Reading};
//!
//! let dataset: Dataset = vec![
//!     Reading::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 20.0, 50.0),
//!     Reading::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 10).unwrap(), 20.5, 51.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.latest().map(|r| r.temperature), Some(20.5));
//! ```

mod dataset;
mod reading;
mod status;

pub use dataset::*;
pub use reading::*;
pub use status::*;
