//! File-based data source.
//!
//! Reads the sensor CSV from a local path, e.g. a copy of the published feed
//! or a file the device logger writes to directly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sensorwatch_types::Dataset;
use tracing::debug;

use super::{log_rejected, DataSource};
use crate::data::codec;
use crate::error::FetchError;

/// A data source that reads the CSV feed from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<Dataset, FetchError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::Unreachable(format!("Read error: {}", e)))?;

        // Invalid UTF-8 is a row-level problem, reported per record
        let report = codec::parse_reader(&content[..]);
        log_rejected(&self.description, &report.rejected);
        debug!(path = %self.path.display(), readings = report.dataset.len(), "Read feed file");

        Ok(report.dataset)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_csv() -> &'static str {
        "Time,Temperature,Humidity\n\
         2024-01-01 00:00:00,20.0,50.0\n\
         2024-01-01 00:00:10,20.5,51.0\n"
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/data.csv");
        assert_eq!(source.path(), Path::new("/tmp/data.csv"));
        assert_eq!(source.description(), "file: /tmp/data.csv");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_csv()).unwrap();

        let source = FileSource::new(file.path());
        let dataset = source.fetch().await.unwrap();
        assert_eq!(dataset.len(), 2);

        // Re-reading picks up appended rows
        writeln!(file, "2024-01-01 00:00:20,21.0,52.0").unwrap();
        file.flush().unwrap();
        let dataset = source.fetch().await.unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/data.csv");

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(ref m) if m.contains("Read error")));
    }

    #[tokio::test]
    async fn test_file_source_drops_row_with_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample_csv().as_bytes()).unwrap();
        file.write_all(b"2024-01-01 00:00:20,2\xff.0,52.0\n").unwrap();
        file.flush().unwrap();

        let dataset = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[tokio::test]
    async fn test_file_source_garbage_is_empty_not_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid csv data").unwrap();

        let dataset = FileSource::new(file.path()).fetch().await.unwrap();
        assert!(dataset.is_empty());
    }
}
