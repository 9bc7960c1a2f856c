//! URL handling module for webharvest
//!
//! This module provides the `CrawlUrl` value type and reference resolution.
//! Every URL the crawler touches is a `CrawlUrl`, produced either by
//! [`CrawlUrl::parse`] (the seed) or by [`normalize`] (discovered
//! references), so "absolute and canonical" is a structural invariant
//! rather than a convention.

mod normalize;

pub use normalize::normalize;

use crate::UrlError;
use std::fmt;
use url::Url;

/// An absolute, canonicalized URL
///
/// Two `CrawlUrl`s identify the same resource iff their canonical string
/// forms are byte-equal. Canonicalization happens once, at construction:
/// the `url` crate's parsing (lowercased host, normalized percent-encoding)
/// plus fragment removal. Trailing slashes, query ordering, and path case
/// are deliberately left alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlUrl(Url);

impl CrawlUrl {
    /// Parses an absolute `http`/`https` URL
    ///
    /// This is the entry point for the seed URL. Discovered references go
    /// through [`normalize`] instead, which resolves them against a base.
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_parsed(url)
    }

    /// Validates an already-parsed URL and strips its fragment
    pub(crate) fn from_parsed(mut url: Url) -> Result<Self, UrlError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }
        if url.host_str().is_none() {
            return Err(UrlError::MissingHost);
        }
        url.set_fragment(None);
        Ok(Self(url))
    }

    /// Returns the canonical string form
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the path component (always begins with `/`)
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Returns the site origin as `scheme://host[:port]`
    pub fn site(&self) -> String {
        let mut site = format!("{}://", self.0.scheme());
        if let Some(host) = self.0.host_str() {
            site.push_str(host);
        }
        if let Some(port) = self.0.port() {
            site.push_str(&format!(":{}", port));
        }
        site
    }

    /// Returns the robots.txt URL for this URL's site
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.site())
    }

    /// Returns true if both URLs share a site origin (scheme, host, port)
    pub fn same_site(&self, other: &CrawlUrl) -> bool {
        self.0.scheme() == other.0.scheme()
            && self.0.host_str() == other.0.host_str()
            && self.0.port() == other.0.port()
    }

    /// Returns the final non-empty path segment, if any
    ///
    /// Used by the downloader to derive a destination filename.
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
    }
}

impl fmt::Display for CrawlUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute_url() {
        let url = CrawlUrl::parse("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_lowercases_host() {
        let url = CrawlUrl::parse("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_parse_strips_fragment() {
        let url = CrawlUrl::parse("https://example.com/page#section").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(CrawlUrl::parse("/just/a/path").is_err());
    }

    #[test]
    fn test_parse_rejects_non_http_scheme() {
        let result = CrawlUrl::parse("ftp://example.com/file");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_site_with_port() {
        let url = CrawlUrl::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(url.site(), "http://127.0.0.1:8080");
        assert_eq!(url.robots_url(), "http://127.0.0.1:8080/robots.txt");
    }

    #[test]
    fn test_site_without_port() {
        let url = CrawlUrl::parse("https://example.com/a/b").unwrap();
        assert_eq!(url.site(), "https://example.com");
    }

    #[test]
    fn test_same_site() {
        let a = CrawlUrl::parse("https://example.com/a").unwrap();
        let b = CrawlUrl::parse("https://example.com/deeply/nested/b").unwrap();
        let other = CrawlUrl::parse("https://other.com/a").unwrap();
        let http = CrawlUrl::parse("http://example.com/a").unwrap();

        assert!(a.same_site(&b));
        assert!(!a.same_site(&other));
        assert!(!a.same_site(&http));
    }

    #[test]
    fn test_file_name() {
        let url = CrawlUrl::parse("https://example.com/docs/report.pdf").unwrap();
        assert_eq!(url.file_name(), Some("report.pdf"));
    }

    #[test]
    fn test_file_name_ignores_trailing_slash() {
        let url = CrawlUrl::parse("https://example.com/docs/").unwrap();
        assert_eq!(url.file_name(), Some("docs"));
    }

    #[test]
    fn test_file_name_none_for_root() {
        let url = CrawlUrl::parse("https://example.com/").unwrap();
        assert_eq!(url.file_name(), None);
    }

    #[test]
    fn test_byte_equality_is_identity() {
        let a = CrawlUrl::parse("https://example.com/page").unwrap();
        let b = CrawlUrl::parse("https://example.com/page#frag").unwrap();
        let c = CrawlUrl::parse("https://example.com/page/").unwrap();

        // Fragments are stripped at construction, trailing slashes are not.
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
