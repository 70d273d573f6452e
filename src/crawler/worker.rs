//! Worker tasks
//!
//! Workers are deliberately stateless: each one pulls a URL from the shared
//! queue, runs it through the page pipeline (fetch, status check, scan,
//! filter), and reports one result back to the coordinator. All graph and
//! backlog state stays on the coordinator task.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::crawler::fetcher::Fetcher;
use crate::crawler::filter::filter_links;
use crate::crawler::parser::scan_links;
use crate::robots::RobotsPolicy;
use crate::PageError;

/// One completed unit of work
///
/// Exactly one of these is produced for every URL taken off the queue,
/// whether the page processed cleanly or not. The coordinator's termination
/// accounting depends on that one-to-one pairing.
#[derive(Debug)]
pub(crate) struct PageResult {
    /// The URL that was processed
    pub url: String,
    /// Its filtered outbound links, or whatever stopped processing
    pub links: Result<Vec<String>, PageError>,
}

/// Runs one worker until the URL queue is closed and drained.
pub(crate) async fn worker_loop(
    id: usize,
    fetcher: Arc<dyn Fetcher>,
    root_url: String,
    robots: Arc<RobotsPolicy>,
    urls: async_channel::Receiver<String>,
    results: mpsc::Sender<PageResult>,
) {
    tracing::debug!("Worker {} started", id);

    while let Ok(url) = urls.recv().await {
        tracing::trace!("Worker {} fetching {}", id, url);
        let links = process_page(fetcher.as_ref(), &root_url, &robots, &url).await;
        if results.send(PageResult { url, links }).await.is_err() {
            // Coordinator gone; nothing left to report to.
            break;
        }
    }

    tracing::debug!("Worker {} finished", id);
}

/// Runs the page pipeline for one URL.
///
/// A transport failure surfaces as-is. A response with any status other
/// than 200 fails the page before its body is looked at. Otherwise the body
/// is scanned for anchors and the results are filtered down to canonical
/// same-site links.
pub(crate) async fn process_page(
    fetcher: &dyn Fetcher,
    root_url: &str,
    robots: &RobotsPolicy,
    url: &str,
) -> Result<Vec<String>, PageError> {
    let response = fetcher.fetch(url).await?;

    if response.status != 200 {
        return Err(PageError::BadStatus(response.status));
    }

    let raw_links = scan_links(&response.body)?;
    filter_links(root_url, robots, &raw_links)
}
