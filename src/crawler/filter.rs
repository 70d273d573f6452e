//! Link filtering
//!
//! Raw hrefs from a scanned page become canonical crawlable URLs here.
//! Every link goes through the same gauntlet, in order:
//! 1. Resolve against the crawl root (relative hrefs become absolute)
//! 2. Strip the fragment; fragments never name a different page
//! 3. Drop repeats, keeping the first occurrence
//! 4. Drop anything whose serialized form does not start with the root,
//!    which confines the crawl to one scheme, host, port, and path subtree
//! 5. Drop paths the site's robots.txt disallows
//!
//! The order matters: deduplication sees post-resolution strings, so
//! `/a`, `a`, and `https://site/a#x` collapse to one entry, and robots
//! rules are only consulted for links that are in scope at all.

use std::collections::HashSet;
use url::Url;

use crate::robots::RobotsPolicy;
use crate::PageError;

/// Filters raw link targets down to the canonical outbound list for a page
///
/// # Arguments
///
/// * `root_url` - The crawl root; links resolve against it and must keep it
///   as a string prefix to survive
/// * `robots` - The robots policy resolved for the site
/// * `raw_links` - Anchor hrefs exactly as scanned from the page
///
/// # Returns
///
/// Canonical absolute URLs in first-seen order, or the first resolution
/// failure. A link that will not parse poisons the whole page; the caller
/// treats that as the page's failure.
pub fn filter_links(
    root_url: &str,
    robots: &RobotsPolicy,
    raw_links: &[String],
) -> Result<Vec<String>, PageError> {
    let base = Url::parse(root_url).map_err(|source| PageError::BadBaseUrl {
        url: root_url.to_string(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for raw in raw_links {
        let mut resolved = base.join(raw).map_err(|source| PageError::BadLink {
            link: raw.clone(),
            source,
        })?;
        resolved.set_fragment(None);

        let link = resolved.to_string();
        if seen.contains(&link) {
            continue;
        }
        seen.insert(link.clone());

        if !link.starts_with(base.as_str()) {
            continue;
        }

        if !robots.allowed(resolved.path()) {
            continue;
        }

        links.push(link);
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "https://site.test/";

    fn raw(links: &[&str]) -> Vec<String> {
        links.iter().map(|s| s.to_string()).collect()
    }

    fn filter(links: &[&str]) -> Vec<String> {
        filter_links(ROOT, &RobotsPolicy::allow_all(), &raw(links)).unwrap()
    }

    #[test]
    fn resolves_relative_links_against_the_root() {
        let links = filter(&["/a", "b.html", "./c"]);
        assert_eq!(
            links,
            vec![
                "https://site.test/a",
                "https://site.test/b.html",
                "https://site.test/c",
            ]
        );
    }

    #[test]
    fn keeps_absolute_links_under_the_root() {
        let links = filter(&["https://site.test/page"]);
        assert_eq!(links, vec!["https://site.test/page"]);
    }

    #[test]
    fn strips_fragments() {
        let links = filter(&["/page#intro"]);
        assert_eq!(links, vec!["https://site.test/page"]);
    }

    #[test]
    fn fragment_variants_collapse_to_one_link() {
        let links = filter(&["/page#a", "/page#b", "/page"]);
        assert_eq!(links, vec!["https://site.test/page"]);
    }

    #[test]
    fn deduplicates_keeping_first_occurrence_order() {
        let links = filter(&["/b", "/a", "/b", "/a"]);
        assert_eq!(links, vec!["https://site.test/b", "https://site.test/a"]);
    }

    #[test]
    fn drops_other_hosts_and_schemes() {
        let links = filter(&[
            "https://other.test/page",
            "https://sub.site.test/page",
            "http://site.test/page",
            "mailto:someone@site.test",
            "/kept",
        ]);
        assert_eq!(links, vec!["https://site.test/kept"]);
    }

    #[test]
    fn confines_to_a_path_subtree_root() {
        let links = filter_links(
            "https://site.test/docs/",
            &RobotsPolicy::allow_all(),
            &raw(&["/docs/guide", "/other", "tutorial"]),
        )
        .unwrap();
        assert_eq!(
            links,
            vec![
                "https://site.test/docs/guide",
                "https://site.test/docs/tutorial",
            ]
        );
    }

    #[test]
    fn empty_href_points_back_at_the_root() {
        let links = filter(&[""]);
        assert_eq!(links, vec!["https://site.test/"]);
    }

    #[test]
    fn drops_robots_disallowed_paths() {
        let robots = RobotsPolicy::from_status_and_body(
            200,
            "User-agent: *\nDisallow: /private\n",
        );
        let links = filter_links(ROOT, &robots, &raw(&["/private/x", "/public"])).unwrap();
        assert_eq!(links, vec!["https://site.test/public"]);
    }

    #[test]
    fn unresolvable_link_fails_the_page() {
        let err = filter_links(ROOT, &RobotsPolicy::allow_all(), &raw(&["http://[::1"]))
            .unwrap_err();
        assert!(matches!(err, PageError::BadLink { .. }));
    }

    #[test]
    fn unparsable_root_fails_before_any_link() {
        let err = filter_links("not a url", &RobotsPolicy::allow_all(), &raw(&["/a"]))
            .unwrap_err();
        assert!(matches!(err, PageError::BadBaseUrl { .. }));
    }

    #[test]
    fn no_links_in_means_no_links_out() {
        assert!(filter(&[]).is_empty());
    }
}
