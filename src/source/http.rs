//! HTTP data source.
//!
//! Fetches the CSV feed with a plain GET. No authentication, no query
//! parameters, no retries: a failed fetch is reported and the caller decides
//! whether to try again on its next poll.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use sensorwatch_types::Dataset;
use tracing::debug;

use super::{log_rejected, DataSource};
use crate::data::codec;
use crate::error::FetchError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A data source that downloads the CSV feed from a URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
    timeout: Duration,
    description: String,
}

impl HttpSource {
    /// Create a new builder for the given URL.
    pub fn builder(url: impl Into<String>) -> HttpSourceBuilder {
        HttpSourceBuilder {
            url: url.into(),
            timeout: None,
            client: None,
        }
    }

    /// The URL being fetched.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Dataset, FetchError> {
        debug!(url = %self.url, "Fetching feed");

        let response = self
            .client
            .get(self.url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Unreachable(format!(
                "Server returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let report = codec::parse_csv(&body);
        log_rejected(&self.description, &report.rejected);
        debug!(
            readings = report.dataset.len(),
            rejected = report.rejected.len(),
            "Parsed feed"
        );

        Ok(report.dataset)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for HttpSource.
#[derive(Debug)]
pub struct HttpSourceBuilder {
    url: String,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl HttpSourceBuilder {
    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client (proxy settings, TLS roots, ...).
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the source.
    ///
    /// Fails if the URL is not an absolute `http` or `https` URL.
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let url = Url::parse(&self.url)
            .map_err(|e| FetchError::Unreachable(format!("Invalid URL '{}': {}", self.url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::Unreachable(format!(
                "Unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| FetchError::Unreachable(format!("HTTP client setup failed: {}", e)))?,
        };

        let description = format!("http: {}", url);
        Ok(HttpSource {
            client,
            url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port, returning its URL.
    async fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/data.csv", addr)
    }

    fn source(url: &str, timeout: Duration) -> HttpSource {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpSource::builder(url)
            .timeout(timeout)
            .client(client)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let source = HttpSource::builder("https://example.com/data.csv").build().unwrap();
        assert_eq!(source.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(source.url().as_str(), "https://example.com/data.csv");
        assert_eq!(source.description(), "http: https://example.com/data.csv");
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        let err = HttpSource::builder("not a url").build().unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));

        let err = HttpSource::builder("ftp://example.com/data.csv").build().unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(ref m) if m.contains("ftp")));
    }

    #[tokio::test]
    async fn test_fetch_parses_body() {
        let body = "time,temp,hum\nnot-a-date,20,50\n2024-01-01T00:00:00Z,21,55";
        let url = serve_once("200 OK", body, Duration::ZERO).await;

        let dataset = source(&url, Duration::from_secs(5)).fetch().await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.readings()[0].temperature, 21.0);
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_empty_dataset() {
        let url = serve_once("200 OK", "", Duration::ZERO).await;

        let dataset = source(&url, Duration::from_secs(5)).fetch().await.unwrap();
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_unreachable() {
        let url = serve_once("404 Not Found", "missing", Duration::ZERO).await;

        let err = source(&url, Duration::from_secs(5)).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(ref m) if m.contains("404")));
    }

    #[tokio::test]
    async fn test_fetch_slow_server_times_out() {
        let url = serve_once("200 OK", "", Duration::from_secs(5)).await;

        let timeout = Duration::from_millis(200);
        let err = source(&url, timeout).fetch().await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(timeout));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/data.csv", listener.local_addr().unwrap());
        drop(listener);

        let err = source(&url, Duration::from_secs(5)).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Unreachable(_)));
    }
}
