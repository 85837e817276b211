//! Caller-owned TTL cache around a data source.
//!
//! The cache is a plain value: `{ last_fetch_time, last_dataset, ttl }`.
//! Whoever owns it decides when to ask for data; there is no shared or
//! global state.

use std::time::Duration;

use sensorwatch_types::Dataset;
use tokio::time::Instant;
use tracing::debug;

use super::DataSource;
use crate::error::FetchError;

/// Wraps a [`DataSource`] so it is not fetched again within `ttl` of the
/// last successful fetch.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use sensorwatch::{CachedSource, HttpSource};
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::builder("https://example.com/data.csv").build()?;
/// let mut cache = CachedSource::new(source, Duration::from_secs(5));
///
/// let first = cache.maybe_refetch().await?.len();
/// // Within five seconds this is served from the cache
/// let second = cache.maybe_refetch().await?.len();
/// assert_eq!(first, second);
/// # Ok::<_, sensorwatch::FetchError>(())
/// # });
/// ```
#[derive(Debug)]
pub struct CachedSource<S> {
    source: S,
    ttl: Duration,
    last_fetch_time: Option<Instant>,
    last_dataset: Dataset,
}

impl<S: DataSource> CachedSource<S> {
    /// Create an empty cache around `source`.
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            last_fetch_time: None,
            last_dataset: Dataset::default(),
        }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The time-to-live of a successful fetch.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// When the last successful fetch completed.
    pub fn last_fetch_time(&self) -> Option<Instant> {
        self.last_fetch_time
    }

    /// The dataset from the last successful fetch, if there has been one.
    ///
    /// A later failed fetch does not clear it.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.last_fetch_time.map(|_| &self.last_dataset)
    }

    /// Whether the cached dataset is younger than the TTL.
    pub fn is_fresh(&self) -> bool {
        self.last_fetch_time
            .is_some_and(|fetched| fetched.elapsed() < self.ttl)
    }

    /// Return the cached dataset if it is fresh, otherwise fetch.
    ///
    /// On failure the error is returned and the previous dataset stays
    /// available through [`CachedSource::dataset`].
    pub async fn maybe_refetch(&mut self) -> Result<&Dataset, FetchError> {
        if self.is_fresh() {
            debug!(source = self.source.description(), "Serving cached dataset");
            return Ok(&self.last_dataset);
        }

        let dataset = self.source.fetch().await?;
        self.last_fetch_time = Some(Instant::now());
        self.last_dataset = dataset;
        Ok(&self.last_dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::scripted::ScriptedSource;
    use chrono::{TimeZone, Utc};
    use sensorwatch_types::Reading;

    fn dataset(n: usize) -> Dataset {
        (0..n)
            .map(|i| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, i as u32).unwrap();
                Reading::new(ts, 20.0, 50.0)
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_serves_cache_within_ttl() {
        let source = ScriptedSource::new(vec![Ok(dataset(1)), Ok(dataset(2))]);
        let mut cache = CachedSource::new(source, Duration::from_secs(5));

        assert!(cache.dataset().is_none());
        assert_eq!(cache.maybe_refetch().await.unwrap().len(), 1);

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(cache.is_fresh());
        assert_eq!(cache.maybe_refetch().await.unwrap().len(), 1);
        assert_eq!(cache.source().calls(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.is_fresh());
        assert_eq!(cache.maybe_refetch().await.unwrap().len(), 2);
        assert_eq!(cache.source().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_dataset() {
        let source = ScriptedSource::new(vec![
            Ok(dataset(3)),
            Err(FetchError::Timeout(Duration::from_secs(10))),
        ]);
        let mut cache = CachedSource::new(source, Duration::from_secs(5));

        cache.maybe_refetch().await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;

        let err = cache.maybe_refetch().await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(Duration::from_secs(10)));
        assert_eq!(cache.dataset().map(Dataset::len), Some(3));
        // A failed fetch does not refresh the TTL
        assert!(!cache.is_fresh());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_failure_has_no_dataset() {
        let source = ScriptedSource::new(vec![Err(FetchError::Unreachable("down".into()))]);
        let mut cache = CachedSource::new(source, Duration::from_secs(5));

        assert!(cache.maybe_refetch().await.is_err());
        assert!(cache.dataset().is_none());
        assert!(cache.last_fetch_time().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_always_fetches() {
        let source = ScriptedSource::new(vec![Ok(dataset(1)), Ok(dataset(1))]);
        let mut cache = CachedSource::new(source, Duration::ZERO);

        cache.maybe_refetch().await.unwrap();
        cache.maybe_refetch().await.unwrap();
        assert_eq!(cache.source().calls(), 2);
    }
}
