//! Image fetching
//!
//! The embedder reads image bytes through [`ImageFetcher`], so conversions
//! can run against the network ([`HttpFetcher`]) or against anything else
//! that can map a URL to bytes, including a plain closure.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

/// Errors that can occur while fetching an image
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL is empty or otherwise unusable
    #[error("Invalid image URL: '{0}'")]
    InvalidUrl(String),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error ({status}) for {url}")]
    Status { status: u16, url: String },

    /// Any other source failure
    #[error("{0}")]
    Other(String),
}

/// Source of image bytes
pub trait ImageFetcher {
    /// Fetch the raw bytes behind `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> ImageFetcher for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self(url)
    }
}

/// Blocking HTTP fetcher
///
/// Requests have no timeout unless one is set with
/// [`with_timeout`](Self::with_timeout). Nothing is cached.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher without a request timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(None)
    }

    /// Create a fetcher with an optional request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        log::debug!("Fetching image {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
