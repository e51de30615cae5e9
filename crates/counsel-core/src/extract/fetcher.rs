//! Content fetching for document extraction.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::{Error, Result};

/// Default timeout for a single document fetch.
///
/// Document fetches happen inline during message normalization, so an
/// unbounded fetch would stall the whole chat turn.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching remote document bytes.
///
/// Implementations should perform a single best-effort request; retry policy
/// is intentionally absent at this layer.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the raw bytes behind a URL.
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Reqwest-backed content fetcher with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a new fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                Error::configuration()
                    .with_message("failed to build HTTP client")
                    .with_source(err)
            })?;

        Ok(Self { client })
    }

    /// Creates a new fetcher with [`DEFAULT_FETCH_TIMEOUT`].
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let url = Url::parse(url).map_err(|err| {
            Error::invalid_input()
                .with_message(format!("invalid document URL: {url}"))
                .with_source(err)
        })?;

        let response = self.client.get(url).send().await.map_err(|err| {
            if err.is_timeout() {
                Error::timeout().with_message("document fetch timed out")
            } else {
                Error::network_error()
                    .with_message("document fetch failed")
                    .with_source(err)
            }
        })?;

        let response = response.error_for_status().map_err(|err| {
            Error::external_error()
                .with_message(format!("document fetch returned {}", err.status().map(|s| s.to_string()).unwrap_or_else(|| "an error".to_string())))
                .with_source(err)
        })?;

        response.bytes().await.map_err(|err| {
            Error::network_error()
                .with_message("failed to read document body")
                .with_source(err)
        })
    }
}
