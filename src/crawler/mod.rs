//! Crawl engine
//!
//! This module contains the moving parts of a crawl:
//! - The coordinator, which owns all crawl state and decides termination
//! - Worker tasks that fetch and scan pages concurrently
//! - The fetch capability and its HTTP implementation
//! - Link scanning and the same-site filter pipeline

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod worker;

pub use coordinator::CrawlReport;
pub use fetcher::{FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use filter::filter_links;
pub use parser::scan_links;

use std::sync::Arc;

use crate::CrawlError;

/// Crawls a site over HTTP and returns its link graph
///
/// This is the main entry point. Starting from `root_url` it will:
/// 1. Resolve the site's robots.txt into an access policy
/// 2. Fetch pages with up to `parallelism` requests in flight
/// 3. Follow every same-site link it has not seen before
/// 4. Assemble the results into a [`crate::Sitemap`]
///
/// Individual page failures are logged and counted, not fatal; the report
/// says how many occurred.
///
/// # Arguments
///
/// * `root_url` - Where the crawl starts; also the prefix links must match
/// * `parallelism` - Number of concurrent fetches, at least 1
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The finished graph and its warning count
/// * `Err(CrawlError)` - The crawl could not run at all
pub async fn crawl(root_url: &str, parallelism: usize) -> Result<CrawlReport, CrawlError> {
    let fetcher = HttpFetcher::new().map_err(CrawlError::Client)?;
    crawl_with(Arc::new(fetcher), root_url, parallelism).await
}

/// Crawls a site through a caller-supplied [`Fetcher`].
///
/// Behaves exactly like [`crawl`] but takes the transport as a capability,
/// which is how the in-memory crawl tests drive the engine.
pub async fn crawl_with(
    fetcher: Arc<dyn Fetcher>,
    root_url: &str,
    parallelism: usize,
) -> Result<CrawlReport, CrawlError> {
    coordinator::run(fetcher, root_url, parallelism).await
}
