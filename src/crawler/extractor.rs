//! Link and asset extraction from fetched HTML
//!
//! Given a page body, produces the set of same-site links to recurse into
//! and the set of downloadable asset references. Malformed markup yields
//! partial sets rather than an error; a reference that cannot be resolved
//! is simply dropped.

use crate::url::{normalize, CrawlUrl};
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Outbound references extracted from one page
#[derive(Debug, Default)]
pub struct Extracted {
    /// Same-site page URLs, candidates for recursion
    pub links: HashSet<CrawlUrl>,

    /// Downloadable asset URLs (documents and images)
    pub assets: HashSet<CrawlUrl>,
}

/// Extracts links and assets from HTML
///
/// # Classification Rules
///
/// - `<a href>` whose resolved path ends in a configured extension
///   (case-sensitive suffix match, no content sniffing) is an **asset**,
///   wherever it points.
/// - Any other `<a href>` resolving to the seed's site is a **link**;
///   off-site anchors are discarded.
/// - `<img src>` is an **asset** when it matches the extension set, and is
///   otherwise ignored.
/// - `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only
///   references are skipped, as are references the normalizer rejects.
pub fn extract(
    page_url: &CrawlUrl,
    root: &CrawlUrl,
    html: &str,
    extensions: &[String],
) -> Extracted {
    let document = Html::parse_document(html);
    let mut extracted = Extracted::default();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(url) = resolve_reference(page_url, href) else {
                continue;
            };

            if has_asset_extension(&url, extensions) {
                extracted.assets.insert(url);
            } else if url.same_site(root) {
                extracted.links.insert(url);
            } else {
                tracing::trace!("Discarding off-site link {}", url);
            }
        }
    }

    if let Ok(image_selector) = Selector::parse("img[src]") {
        for element in document.select(&image_selector) {
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Some(url) = resolve_reference(page_url, src) else {
                continue;
            };

            if has_asset_extension(&url, extensions) {
                extracted.assets.insert(url);
            }
        }
    }

    extracted
}

/// Resolves a raw attribute value against the page URL
///
/// Returns None for references that can never be crawled: special schemes,
/// same-page anchors, and anything the normalizer rejects as malformed.
fn resolve_reference(page_url: &CrawlUrl, reference: &str) -> Option<CrawlUrl> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    if reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    match normalize(page_url, reference) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Discarding reference {:?} on {}: {}", reference, page_url, e);
            None
        }
    }
}

/// Case-sensitive suffix test against the configured extension set
fn has_asset_extension(url: &CrawlUrl, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| url.path().ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        vec![".pdf".to_string(), ".jpg".to_string(), ".png".to_string()]
    }

    fn page() -> CrawlUrl {
        CrawlUrl::parse("https://site/docs/index.html").unwrap()
    }

    fn root() -> CrawlUrl {
        CrawlUrl::parse("https://site/").unwrap()
    }

    fn contains(set: &HashSet<CrawlUrl>, s: &str) -> bool {
        set.iter().any(|u| u.as_str() == s)
    }

    #[test]
    fn test_relative_asset_and_image_resolution() {
        let html = r#"<html><body>
            <a href="report.pdf">Report</a>
            <img src="logo.png" />
        </body></html>"#;

        let extracted = extract(&page(), &root(), html, &extensions());
        assert!(contains(&extracted.assets, "https://site/docs/report.pdf"));
        assert!(contains(&extracted.assets, "https://site/docs/logo.png"));
        assert!(extracted.links.is_empty());
    }

    #[test]
    fn test_same_site_anchor_is_link() {
        let html = r#"<a href="/about">About</a><a href="next.html">Next</a>"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(contains(&extracted.links, "https://site/about"));
        assert!(contains(&extracted.links, "https://site/docs/next.html"));
        assert!(extracted.assets.is_empty());
    }

    #[test]
    fn test_off_site_anchor_discarded() {
        let html = r#"<a href="https://elsewhere.example/page">Other</a>"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(extracted.links.is_empty());
        assert!(extracted.assets.is_empty());
    }

    #[test]
    fn test_off_site_asset_kept() {
        // Asset classification is by extension, wherever the file lives.
        let html = r#"<a href="https://cdn.example/files/paper.pdf">Paper</a>"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(contains(
            &extracted.assets,
            "https://cdn.example/files/paper.pdf"
        ));
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let html = r#"<a href="/REPORT.PDF">Shouty</a><a href="/report.pdf">Quiet</a>"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(contains(&extracted.assets, "https://site/report.pdf"));
        // Uppercase suffix does not match; it resolves same-site, so it is
        // treated as a page link instead.
        assert!(contains(&extracted.links, "https://site/REPORT.PDF"));
    }

    #[test]
    fn test_image_without_matching_extension_ignored() {
        let html = r#"<img src="/photo.webp" />"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(extracted.assets.is_empty());
        assert!(extracted.links.is_empty());
    }

    #[test]
    fn test_special_schemes_and_fragments_skipped() {
        let html = r##"
            <a href="javascript:void(0)">x</a>
            <a href="mailto:me@site">x</a>
            <a href="tel:+123">x</a>
            <a href="data:text/plain,hi">x</a>
            <a href="#section">x</a>
            <a href="">x</a>
        "##;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(extracted.links.is_empty());
        assert!(extracted.assets.is_empty());
    }

    #[test]
    fn test_duplicate_references_deduplicated() {
        let html = r#"
            <a href="/a">one</a>
            <a href="/a">two</a>
            <a href="report.pdf">r1</a>
            <img src="report.pdf" />
        "#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert_eq!(extracted.links.len(), 1);
        assert_eq!(extracted.assets.len(), 1);
    }

    #[test]
    fn test_malformed_markup_yields_partial_sets() {
        let html = r#"<html><body><a href="/ok">ok</a><div><<<>>"#;
        let extracted = extract(&page(), &root(), html, &extensions());

        assert!(contains(&extracted.links, "https://site/ok"));
    }

    #[test]
    fn test_empty_body() {
        let extracted = extract(&page(), &root(), "", &extensions());
        assert!(extracted.links.is_empty());
        assert!(extracted.assets.is_empty());
    }
}
