//! Data source abstraction for fetching sensor datasets.
//!
//! This module provides a trait-based abstraction for fetching the sensor
//! feed from various places (an HTTP URL, a local file) and an explicit,
//! caller-owned cache around any of them.

mod cache;
mod file;
mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use cache::CachedSource;
pub use file::FileSource;
pub use http::{HttpSource, HttpSourceBuilder, DEFAULT_TIMEOUT};

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use sensorwatch_types::Dataset;
use tracing::{debug, warn};

use crate::error::{FetchError, ParseError};

/// Trait for fetching a dataset snapshot from a source.
///
/// Each call is an independent request/response: no retries, no caching.
/// Wrap a source in [`CachedSource`] to avoid re-fetching within a TTL.
///
/// # Example
///
/// ```no_run
/// use sensorwatch::{DataSource, FileSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("data.csv");
/// match source.fetch().await {
///     Ok(dataset) => println!("Got {} readings", dataset.len()),
///     Err(e) => eprintln!("{}: {}", source.description(), e),
/// }
/// # });
/// ```
#[async_trait]
pub trait DataSource: Send + Sync + Debug {
    /// Fetch the current dataset.
    ///
    /// Malformed rows are dropped; only source-level failures are errors.
    async fn fetch(&self) -> Result<Dataset, FetchError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for Box<S> {
    async fn fetch(&self) -> Result<Dataset, FetchError> {
        (**self).fetch().await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}

/// Fetch and parse the CSV published at `source_url`.
///
/// Convenience wrapper around a one-off [`HttpSource`].
pub async fn fetch(source_url: &str, timeout: Duration) -> Result<Dataset, FetchError> {
    HttpSource::builder(source_url)
        .timeout(timeout)
        .build()?
        .fetch()
        .await
}

/// Open the source named by `url`.
///
/// `file://` URLs are read from disk; anything else goes through
/// [`HttpSource`] with the given request timeout.
pub fn open(url: &str, timeout: Duration) -> Result<Box<dyn DataSource>, FetchError> {
    if let Some(path) = url.strip_prefix("file://") {
        if path.is_empty() {
            return Err(FetchError::Unreachable(format!("Invalid URL '{}': empty path", url)));
        }
        return Ok(Box::new(FileSource::new(path)));
    }

    let source = HttpSource::builder(url).timeout(timeout).build()?;
    Ok(Box::new(source))
}

fn log_rejected(source: &str, rejected: &[ParseError]) {
    if rejected.is_empty() {
        return;
    }
    warn!(source, count = rejected.len(), "Dropped malformed rows");
    for err in rejected {
        debug!(source, "{}", err);
    }
}
