//! Parsing and evaluation of sensor readings.
//!
//! This module turns raw CSV text into a [`Dataset`] and derives everything
//! the presentation layer shows from it.
//!
//! ## Submodules
//!
//! - [`codec`]: CSV parsing with malformed-row tolerance, and CSV export
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "30s", "5m")
//! - [`filter`]: Date-range and recent-window selection
//! - [`liveness`]: Online/offline/unknown status from the newest reading
//! - [`timestamp`]: Timestamp parsing, normalized to UTC
//!
//! ## Data Flow
//!
//! ```text
//! CSV text
//!    │
//!    ▼
//! codec::parse_csv()  ──▶ ParseReport { dataset, rejected }
//!    │
//!    ├──▶ liveness::liveness()         ──▶ Liveness { status, last_seen }
//!    │
//!    └──▶ filter::{filter_by_date, tail_window, tail_n} ──▶ Dataset
//! ```
//!
//! [`Dataset`]: sensorwatch_types::Dataset

pub mod codec;
pub mod duration;
pub mod filter;
pub mod liveness;
pub mod timestamp;

pub use codec::{parse_csv, parse_reader, to_csv_string, write_csv, ParseReport};
pub use filter::{filter_by_date, tail_n, tail_window};
pub use liveness::{age, liveness, status_of, DEFAULT_OFFLINE_AFTER};
pub use timestamp::parse_timestamp;
