//! Application state for the polling viewer.
//!
//! [`App`] owns the (cached) data source and remembers the outcome of the
//! last poll, so a presentation layer can tell "no data yet", "fetch failed"
//! and "device offline" apart.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone};
use sensorwatch_types::{Dataset, Liveness, Reading};
use tracing::{debug, info, warn};

use crate::data::{filter_by_date, liveness, tail_n, tail_window, DEFAULT_OFFLINE_AFTER};
use crate::error::{FetchError, InvalidRangeError};
use crate::source::{CachedSource, DataSource};

/// Evaluation and display options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Age of the newest reading at which the device counts as offline.
    pub offline_after: Duration,
    /// How far back from the newest reading the live view reaches.
    pub live_window: Duration,
    /// Maximum rows in the live table.
    pub table_rows: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            offline_after: DEFAULT_OFFLINE_AFTER,
            live_window: Duration::from_secs(5 * 60),
            table_rows: 10,
        }
    }
}

/// What the status line should say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    /// No successful fetch yet, or the feed has no readings.
    NoData,
    /// The last fetch failed.
    FetchFailed(FetchError),
    /// The feed was fetched; the device is online or offline.
    Feed(Liveness),
}

/// Main application state.
pub struct App {
    cache: CachedSource<Box<dyn DataSource>>,
    pub view: ViewConfig,
    last_error: Option<FetchError>,
    last_count: Option<usize>,
}

impl App {
    /// Create a new App around `source`, re-fetching at most once per `ttl`.
    pub fn new(source: Box<dyn DataSource>, ttl: Duration, view: ViewConfig) -> Self {
        Self {
            cache: CachedSource::new(source, ttl),
            view,
            last_error: None,
            last_count: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.cache.source().description()
    }

    /// Run one poll cycle.
    ///
    /// Returns `true` if data is available from this cycle (fresh or cached).
    pub async fn refresh(&mut self) -> bool {
        let fetched = self.cache.maybe_refetch().await.map(Dataset::len);
        match fetched {
            Ok(count) => {
                if self.last_count != Some(count) {
                    info!(
                        source = self.source_description(),
                        readings = count,
                        "Feed updated"
                    );
                } else {
                    debug!(readings = count, "Feed unchanged");
                }
                self.last_count = Some(count);
                self.last_error = None;
                true
            }
            Err(e) => {
                warn!(source = self.source_description(), error = %e, "Fetch failed");
                self.last_error = Some(e);
                false
            }
        }
    }

    /// The error from the last poll, if it failed.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// The dataset from the last successful fetch.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.cache.dataset()
    }

    /// The three-way status for display at `now`.
    pub fn indicator<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Indicator {
        if let Some(err) = &self.last_error {
            return Indicator::FetchFailed(err.clone());
        }

        match self.cache.dataset() {
            Some(dataset) if !dataset.is_empty() => {
                Indicator::Feed(liveness(dataset, now, self.view.offline_after))
            }
            _ => Indicator::NoData,
        }
    }

    /// The last reading in arrival order, for "current value" display.
    pub fn latest(&self) -> Option<&Reading> {
        self.dataset().and_then(Dataset::latest)
    }

    /// Readings within the live window of the newest reading.
    pub fn recent(&self) -> Dataset {
        self.dataset()
            .map(|dataset| tail_window(dataset, self.view.live_window))
            .unwrap_or_default()
    }

    /// The last `table_rows` readings of the live window.
    pub fn live_table(&self) -> Dataset {
        tail_n(&self.recent(), self.view.table_rows)
    }

    /// All readings, or those between `start` and `end` (inclusive).
    ///
    /// A missing bound leaves that side open.
    pub fn historical_view(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Dataset, InvalidRangeError> {
        let Some(dataset) = self.dataset() else {
            return Ok(Dataset::default());
        };

        match (start, end) {
            (None, None) => Ok(dataset.clone()),
            (start, end) => filter_by_date(
                dataset,
                start.unwrap_or(NaiveDate::MIN),
                end.unwrap_or(NaiveDate::MAX),
            ),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("source", &self.source_description())
            .field("view", &self.view)
            .field("last_error", &self.last_error)
            .finish()
    }
}
