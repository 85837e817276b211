//! # sensorwatch
//!
//! A library and headless CLI for watching a temperature/humidity sensor
//! whose readings are appended to a CSV file published at a URL.
//!
//! The crate fetches the feed, parses it into a [`Dataset`] of UTC
//! [`Reading`]s, and evaluates it: is the device online, what were the
//! latest values, which readings fall in a date range or the live window.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐               │
//! │  │  app    │───▶│   data   │───▶│  report  │───▶ stdout    │
//! │  │ (state) │    │(evaluate)│    │(text/json)               │
//! │  └────┬────┘    └──────────┘    └──────────┘               │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource, via CachedSource   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with HTTP and
//!   file implementations, plus the caller-owned TTL cache [`CachedSource`]
//! - **[`data`]**: CSV codec, timestamp normalization, liveness and filters
//! - **[`app`]**: Poll state; tells "no data", "fetch failed" and "offline" apart
//! - **[`report`]**: Plain-text and JSON rendering
//! - **[`config`]**: Layered settings (defaults, TOML file, environment, CLI)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the feed every 10 seconds
//! sensorwatch --url https://example.com/sensor/data.csv
//!
//! # Print the status once as JSON
//! sensorwatch --url https://example.com/sensor/data.csv --once --json
//!
//! # Export January to a local CSV
//! sensorwatch --url https://example.com/sensor/data.csv \
//!     --export january.csv --from 2024-01-01 --to 2024-01-31
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::time::Duration;
//! use chrono::Utc;
//! use sensorwatch::{fetch, liveness, DeviceStatus};
//!
//! # tokio_test::block_on(async {
//! let dataset = fetch("https://example.com/data.csv", Duration::from_secs(10)).await?;
//! let status = liveness(&dataset, Utc::now(), Duration::from_secs(30));
//! if status.status == DeviceStatus::Offline {
//!     eprintln!("Sensor silent since {:?}", status.last_seen);
//! }
//! # Ok::<_, sensorwatch::FetchError>(())
//! # });
//! ```
//!
//! ### Polling through the application state
//!
//! ```
//! use std::time::Duration;
//! use sensorwatch::{App, FileSource, Indicator, ViewConfig};
//!
//! let source = Box::new(FileSource::new("data.csv"));
//! let app = App::new(source, Duration::from_secs(5), ViewConfig::default());
//! assert_eq!(app.indicator(chrono::Utc::now()), Indicator::NoData);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod source;

// Re-export main types for convenience
pub use app::{App, Indicator, ViewConfig};
pub use config::{Overrides, Settings};
pub use data::{filter_by_date, liveness, parse_csv, tail_window, write_csv};
pub use error::{ExportError, FetchError, InvalidRangeError, ParseError};
pub use sensorwatch_types::{Dataset, DeviceStatus, Liveness, Reading};
pub use source::{fetch, CachedSource, DataSource, FileSource, HttpSource, HttpSourceBuilder};
