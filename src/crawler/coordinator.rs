//! Crawl coordination
//!
//! The coordinator owns every piece of mutable crawl state: the sitemap
//! under construction, the backlog of URLs waiting for a queue slot, and
//! the outstanding-work counter that decides when the crawl is over.
//! Workers never touch any of it; they receive URLs over a bounded queue
//! and send page results back, so the graph needs no locks.
//!
//! The main loop alternates two steps while work remains:
//! 1. Drain the backlog into the work queue with non-blocking sends,
//!    stopping at the first refusal
//! 2. Block for exactly one page result and merge it
//!
//! `outstanding` counts URLs that are queued, being fetched, or waiting to
//! be merged. Every dispatched URL comes back as exactly one result, so
//! the crawl is complete precisely when the counter returns to zero. New
//! URLs discovered in a result bump the counter before they enter the
//! backlog, which keeps the count an upper bound on pending results and
//! makes the blocking receive safe: a result is always on its way.
//!
//! Because sends never block, a full queue can never wedge the loop; the
//! overflow just sits in the backlog until workers catch up.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

use crate::crawler::fetcher::Fetcher;
use crate::crawler::worker::{worker_loop, PageResult};
use crate::robots;
use crate::sitemap::Sitemap;
use crate::CrawlError;

/// Work queue slots per worker. Bursts of freshly discovered links get
/// buffered here before backpressure diverts them to the backlog.
const QUEUE_SLOTS_PER_WORKER: usize = 10;

/// Outcome of a completed crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Link graph of every page reached from the root
    pub sitemap: Sitemap,

    /// Number of pages that failed and were skipped
    pub warnings: usize,
}

/// Runs a full crawl and returns the assembled report.
pub(crate) async fn run(
    fetcher: Arc<dyn Fetcher>,
    root_url: &str,
    parallelism: usize,
) -> Result<CrawlReport, CrawlError> {
    if parallelism < 1 {
        return Err(CrawlError::Parallelism(parallelism));
    }

    let base = Url::parse(root_url).map_err(|source| CrawlError::InvalidRootUrl {
        url: root_url.to_string(),
        source,
    })?;

    // The serialized form of the parsed root is the crawl's canonical base.
    // Links resolve and compare against it, so the seed must be the same
    // string a self-link would produce.
    let root = base.to_string();

    let robots = Arc::new(robots::resolve_policy(fetcher.as_ref(), &base).await?);

    tracing::debug!("Starting crawl of {} with parallelism {}", root, parallelism);

    let (url_tx, url_rx) = async_channel::bounded(parallelism * QUEUE_SLOTS_PER_WORKER);
    let (result_tx, mut result_rx) = mpsc::channel(parallelism);

    let mut workers = Vec::with_capacity(parallelism);
    for id in 0..parallelism {
        let fetcher = Arc::clone(&fetcher);
        let robots = Arc::clone(&robots);
        let root = root.clone();
        let urls = url_rx.clone();
        let results = result_tx.clone();
        workers.push(tokio::spawn(async move {
            worker_loop(id, fetcher, root, robots, urls, results).await;
        }));
    }
    drop(url_rx);
    drop(result_tx);

    let mut sitemap = Sitemap::new();
    let mut backlog = VecDeque::new();
    backlog.push_back(root.clone());
    let mut outstanding: usize = 1;
    let mut warnings: usize = 0;

    while outstanding > 0 {
        // Dispatch as much backlog as the queue will take right now. A
        // refused URL goes back to the front so dispatch order is stable.
        while let Some(next) = backlog.pop_front() {
            if let Err(refused) = url_tx.try_send(next) {
                backlog.push_front(refused.into_inner());
                break;
            }
        }

        let result = match result_rx.recv().await {
            Some(result) => result,
            // All senders gone while results were still owed.
            None => return Err(CrawlError::WorkersStopped),
        };
        outstanding -= 1;

        merge_result(
            &mut sitemap,
            &mut backlog,
            &mut outstanding,
            &mut warnings,
            result,
        );
    }

    url_tx.close();
    for worker in workers {
        if let Err(e) = worker.await {
            tracing::error!("Worker task failed: {}", e);
        }
    }

    tracing::info!(
        "Crawl finished: {} pages, {} warnings",
        sitemap.len(),
        warnings
    );

    Ok(CrawlReport { sitemap, warnings })
}

/// Folds one page result into the crawl state.
///
/// A failed page costs a warning and nothing else; its URL stays in the
/// graph as a node because some page linked to it. A successful page adds
/// its edges, and each target the graph has never seen is scheduled and
/// counted as one more outstanding unit of work.
fn merge_result(
    sitemap: &mut Sitemap,
    backlog: &mut VecDeque<String>,
    outstanding: &mut usize,
    warnings: &mut usize,
    result: PageResult,
) {
    match result.links {
        Err(e) => {
            *warnings += 1;
            tracing::warn!("Crawling problem for {}: {}", result.url, e);
        }
        Ok(links) => {
            let new_urls = sitemap.add_links(&result.url, &links);
            tracing::debug!(
                "Processed {}: {} links, {} new",
                result.url,
                links.len(),
                new_urls.len()
            );
            for new_url in new_urls {
                *outstanding += 1;
                backlog.push_back(new_url);
            }
        }
    }
}
