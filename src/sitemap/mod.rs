//! Link graph of crawled pages
//!
//! The sitemap is a directed graph: each node is a canonical URL string and
//! each edge records a link from one crawled page to another. Ordered
//! collections back both levels of the graph, so serialization is sorted
//! without any extra pass and two crawls of the same site produce identical
//! bytes no matter how their fetches interleaved.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Directed graph of pages and the links between them
///
/// Keys are canonical URL strings as produced by the crawl filter. Every URL
/// that appears as a link target is also a node, even when its own page was
/// never successfully scanned, so the graph is closed under edges.
#[derive(Debug, Default)]
pub struct Sitemap {
    outbound: BTreeMap<String, BTreeSet<String>>,
}

impl Sitemap {
    /// Creates an empty sitemap.
    pub fn new() -> Self {
        Self {
            outbound: BTreeMap::new(),
        }
    }

    /// Records a page and its outbound links.
    ///
    /// Returns the link targets that were not yet in the graph, in input
    /// order. The source URL is registered before any target is examined, so
    /// a page is never reported as its own discovery; callers are expected
    /// to have dispatched `from` already.
    ///
    /// Calling this twice with the same arguments is a no-op the second
    /// time: edges are a set, and no target can be new twice.
    pub fn add_links(&mut self, from: &str, links: &[String]) -> Vec<String> {
        self.outbound.entry(from.to_string()).or_default();

        let mut new_urls = Vec::new();
        for link in links {
            if !self.outbound.contains_key(link.as_str()) {
                self.outbound.insert(link.clone(), BTreeSet::new());
                new_urls.push(link.clone());
            }
        }

        if let Some(targets) = self.outbound.get_mut(from) {
            targets.extend(links.iter().cloned());
        }

        new_urls
    }

    /// Number of pages (nodes) in the graph.
    pub fn len(&self) -> usize {
        self.outbound.len()
    }

    /// Whether the graph holds no pages at all.
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
    }

    /// Whether `url` is a node in the graph.
    pub fn contains(&self, url: &str) -> bool {
        self.outbound.contains_key(url)
    }

    /// Outbound links recorded for `url`, if it is a node.
    pub fn links_from(&self, url: &str) -> Option<&BTreeSet<String>> {
        self.outbound.get(url)
    }

    /// Writes the sitemap as plain text.
    ///
    /// One block per page in ascending URL order: the page URL on its own
    /// line, one `" -> target"` line per outbound link (also ascending),
    /// then a blank line. A page with no outbound links still gets its URL
    /// line and the trailing blank line.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (url, targets) in &self.outbound {
            writeln!(out, "{}", url)?;
            for target in targets {
                writeln!(out, " -> {}", target)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
