//! Robots.txt handling
//!
//! One robots policy is resolved per crawl, before any page is fetched, and
//! shared read-only by every worker. The whole crawl stays on one site, so
//! there is exactly one robots.txt to consult.

mod policy;

pub use policy::RobotsPolicy;

use url::Url;

use crate::crawler::Fetcher;
use crate::CrawlError;

/// Resolves the robots policy for the site rooted at `base`
///
/// Fetches `/robots.txt` at the site root, wherever under the site the
/// crawl root points. HTTP-level outcomes (found, missing, broken) map to
/// policies and never fail; only a transport error aborts, since without an
/// answer from the site no polite crawl can start.
///
/// # Arguments
///
/// * `fetcher` - Transport used for the single robots.txt request
/// * `base` - The parsed crawl root
///
/// # Returns
///
/// * `Ok(RobotsPolicy)` - The policy every crawled path is checked against
/// * `Err(CrawlError)` - The robots.txt request itself failed
pub async fn resolve_policy(
    fetcher: &dyn Fetcher,
    base: &Url,
) -> Result<RobotsPolicy, CrawlError> {
    let robots_url = base
        .join("/robots.txt")
        .map_err(|source| CrawlError::InvalidRootUrl {
            url: base.to_string(),
            source,
        })?;

    let response = fetcher
        .fetch(robots_url.as_str())
        .await
        .map_err(CrawlError::RobotsSetup)?;

    tracing::debug!(
        "Resolved robots.txt at {} (status {})",
        robots_url,
        response.status
    );

    Ok(RobotsPolicy::from_status_and_body(
        response.status,
        &response.body,
    ))
}
