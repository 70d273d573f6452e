//! Sitemapper: a same-site crawler with deterministic text output
//!
//! This crate crawls a website from a root URL with a fixed number of
//! concurrent fetches, restricting itself to pages under the root and to
//! paths the site's robots.txt allows, and collects the link structure
//! into a graph that serializes as sorted plain text.

pub mod crawler;
pub mod robots;
pub mod sitemap;

use thiserror::Error;

/// Errors that abort a crawl outright
///
/// Anything that goes wrong on an individual page is a [`PageError`] and
/// costs a warning instead; these variants mean the crawl as a whole could
/// not run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Parallelism must be > 0 (got {0})")]
    Parallelism(usize),

    #[error("Invalid root URL {url:?}: {source}")]
    InvalidRootUrl {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Client(crawler::FetchError),

    #[error("Could not set up robots.txt filter: {0}")]
    RobotsSetup(#[source] crawler::FetchError),

    #[error("Crawl workers stopped before the crawl finished")]
    WorkersStopped,
}

/// Failures scoped to a single page
///
/// The coordinator logs these as warnings and keeps crawling; the page that
/// produced one contributes no outbound links.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] crawler::FetchError),

    #[error("Bad HTTP status {0}")]
    BadStatus(u16),

    #[error("Could not scan page for links: {0}")]
    Scan(String),

    #[error("Invalid base URL {url:?}: {source}")]
    BadBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Could not resolve link {link:?}: {source}")]
    BadLink {
        link: String,
        source: url::ParseError,
    },
}

/// Result type alias for whole-crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use crawler::{crawl, crawl_with, CrawlReport, FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use robots::RobotsPolicy;
pub use sitemap::Sitemap;
