//! Fetching pages
//!
//! The crawler never touches the network directly; everything goes through
//! the [`Fetcher`] trait. That keeps the crawl logic testable against
//! in-memory sites and keeps HTTP details (client setup, timeouts,
//! decompression) in one place.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("sitemapper/", env!("CARGO_PKG_VERSION"));

/// Transport-level fetch failure
///
/// These mean no HTTP status was obtained at all. A page that answered with
/// an error status is not a `FetchError`; it comes back as a normal
/// [`FetchResponse`] carrying that status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request for {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// A completed fetch: the status the server answered with plus the body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body decoded as text
    pub body: String,
}

/// Capability for retrieving a URL
///
/// Implementations must be shareable across worker tasks. They report
/// HTTP-level failures (404 and friends) through [`FetchResponse::status`];
/// an `Err` means the transport itself gave out and no status exists.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieves `url` and returns its status and body.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// [`Fetcher`] backed by a reqwest client
///
/// Follows redirects, decompresses gzip and brotli bodies, and gives up on
/// requests that take longer than 30 seconds end to end (10 seconds to
/// connect).
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the fetcher and its underlying HTTP client.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(FetchResponse { status, body })
    }
}
