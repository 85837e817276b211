//! Scripted data source for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sensorwatch_types::Dataset;

use super::DataSource;
use crate::error::FetchError;

/// Source that replays scripted results and counts calls.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    results: Mutex<Vec<Result<Dataset, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn new(mut results: Vec<Result<Dataset, FetchError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn fetch(&self) -> Result<Dataset, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(FetchError::Unreachable("script exhausted".into())))
    }

    fn description(&self) -> &str {
        "scripted"
    }
}
