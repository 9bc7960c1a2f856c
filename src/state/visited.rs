//! Visited-set tracking
//!
//! Guarantees each URL is dispatched to the fetcher at most once per crawl
//! run, even when concurrent branches discover the same URL.

use crate::url::CrawlUrl;
use std::collections::HashSet;
use std::sync::Mutex;

/// Run-scoped set of URLs already dispatched for fetching
///
/// The set only grows; there is no unmarking and no eviction. It lives
/// exactly as long as one crawl run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically checks membership and inserts if absent
    ///
    /// Returns `true` iff the URL was newly marked, i.e. the caller holds
    /// the right to fetch it. The check and the insert happen under one
    /// lock acquisition, so two racing branches can never both win.
    pub fn try_mark(&self, url: &CrawlUrl) -> bool {
        self.inner.lock().unwrap().insert(url.as_str().to_string())
    }

    /// Returns the number of marked URLs
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns true if nothing has been marked yet
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> CrawlUrl {
        CrawlUrl::parse(s).unwrap()
    }

    #[test]
    fn test_first_mark_wins() {
        let visited = VisitedSet::new();
        assert!(visited.try_mark(&url("https://example.com/a")));
        assert!(!visited.try_mark(&url("https://example.com/a")));
    }

    #[test]
    fn test_distinct_urls_mark_independently() {
        let visited = VisitedSet::new();
        assert!(visited.try_mark(&url("https://example.com/a")));
        assert!(visited.try_mark(&url("https://example.com/b")));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_canonical_form_is_identity() {
        let visited = VisitedSet::new();
        // Fragment is stripped at construction, so these collide.
        assert!(visited.try_mark(&url("https://example.com/a")));
        assert!(!visited.try_mark(&url("https://example.com/a#section")));
        // A trailing slash is a different canonical URL.
        assert!(visited.try_mark(&url("https://example.com/a/")));
    }

    #[test]
    fn test_concurrent_marking_admits_exactly_one_winner() {
        let visited = Arc::new(VisitedSet::new());
        let target = url("https://example.com/contested");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let visited = visited.clone();
            let target = target.clone();
            handles.push(std::thread::spawn(move || visited.try_mark(&target)));
        }

        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(wins, 1);
        assert_eq!(visited.len(), 1);
    }
}
