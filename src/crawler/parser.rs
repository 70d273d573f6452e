//! HTML link scanning
//!
//! This module extracts anchor targets from fetched pages. It deliberately
//! does as little as possible:
//! - Every `<a href="...">` value is returned verbatim, in document order
//! - No resolution, deduplication, or scheme checks happen here
//!
//! Turning raw hrefs into canonical crawlable URLs is the filter's job, so
//! the full set of rejection rules lives in one place.

use scraper::{Html, Selector};

use crate::PageError;

/// Scans an HTML document for anchor targets
///
/// Parsing is lenient in the way browsers are: malformed markup never fails,
/// it just yields whatever anchors survive recovery.
///
/// # Arguments
///
/// * `html` - The HTML content to scan
///
/// # Returns
///
/// The raw `href` values of every anchor, in document order, duplicates
/// included.
pub fn scan_links(html: &str) -> Result<Vec<String>, PageError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| PageError::Scan(e.to_string()))?;

    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_hrefs_verbatim_in_document_order() {
        let html = r##"
            <html>
            <body>
                <a href="/first">One</a>
                <a href="second.html">Two</a>
                <a href="https://other.com/third">Three</a>
                <a href="#fragment">Four</a>
            </body>
            </html>
        "##;
        let links = scan_links(html).unwrap();
        assert_eq!(
            links,
            vec!["/first", "second.html", "https://other.com/third", "#fragment"]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let html = r#"<html><body><a href="/page">A</a><a href="/page">B</a></body></html>"#;
        let links = scan_links(html).unwrap();
        assert_eq!(links, vec!["/page", "/page"]);
    }

    #[test]
    fn ignores_anchors_without_href() {
        let html = r#"<html><body><a name="top">Anchor</a><a href="/real">Real</a></body></html>"#;
        let links = scan_links(html).unwrap();
        assert_eq!(links, vec!["/real"]);
    }

    #[test]
    fn ignores_non_anchor_urls() {
        let html = r#"
            <html>
            <head><link rel="stylesheet" href="/style.css"></head>
            <body>
                <img src="/pic.png">
                <script src="/app.js"></script>
                <a href="/page">Link</a>
            </body>
            </html>
        "#;
        let links = scan_links(html).unwrap();
        assert_eq!(links, vec!["/page"]);
    }

    #[test]
    fn empty_document_has_no_links() {
        let links = scan_links("").unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn recovers_from_malformed_markup() {
        let html = r#"<html><body><p><a href="/page">never closed"#;
        let links = scan_links(html).unwrap();
        assert_eq!(links, vec!["/page"]);
    }

    #[test]
    fn scans_nested_anchors() {
        let html = r#"
            <html><body>
                <div><ul><li><a href="/deep">Deep</a></li></ul></div>
            </body></html>
        "#;
        let links = scan_links(html).unwrap();
        assert_eq!(links, vec!["/deep"]);
    }
}
