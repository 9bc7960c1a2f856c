//! Per-site robots policy cache
//!
//! Policies are fetched lazily on the first URL seen for a site and kept
//! for the lifetime of the crawl run. The cache guarantees a single
//! robots.txt fetch per site even when concurrent crawl branches race on
//! the first query.

use crate::robots::RobotsPolicy;
use crate::url::CrawlUrl;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Run-scoped store of per-site crawl-exclusion policies
pub struct PolicyStore {
    client: Client,
    /// One lazily-initialized cell per site origin. The mutex only guards
    /// the map itself; the fetch happens inside the cell so concurrent
    /// callers for one site block on a single in-flight request.
    sites: Mutex<HashMap<String, Arc<OnceCell<RobotsPolicy>>>>,
}

impl PolicyStore {
    /// Creates an empty policy store backed by the given HTTP client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            sites: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether a URL is allowed by its site's policy
    ///
    /// On the first query for a site this fetches `{site}/robots.txt` with
    /// a single attempt. A failed fetch or non-success status yields a
    /// permanent allow-all policy for the site (fail-open): an absent or
    /// unreachable policy never halts crawling.
    pub async fn is_allowed(&self, url: &CrawlUrl) -> bool {
        let cell = self.cell_for(&url.site());
        let policy = cell
            .get_or_init(|| fetch_policy(self.client.clone(), url.robots_url()))
            .await;

        policy.is_allowed(url.path())
    }

    /// Returns the number of sites with a resolved policy
    pub fn site_count(&self) -> usize {
        self.sites.lock().unwrap().len()
    }

    fn cell_for(&self, site: &str) -> Arc<OnceCell<RobotsPolicy>> {
        let mut sites = self.sites.lock().unwrap();
        sites
            .entry(site.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

/// Fetches and parses a site's robots.txt, falling back to allow-all
///
/// One attempt, no retry. Every fallback path logs a warning so operators
/// can see which sites were crawled without a policy.
async fn fetch_policy(client: Client, robots_url: String) -> RobotsPolicy {
    let response = match client.get(&robots_url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {} (allowing all)", robots_url, e);
            return RobotsPolicy::allow_all();
        }
    };

    if !response.status().is_success() {
        tracing::warn!(
            "{} returned HTTP {} (allowing all)",
            robots_url,
            response.status().as_u16()
        );
        return RobotsPolicy::allow_all();
    }

    match response.text().await {
        Ok(content) => {
            let policy = RobotsPolicy::parse(&content);
            tracing::debug!(
                "Parsed {} with {} disallow rule(s)",
                robots_url,
                policy.rule_count()
            );
            policy
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {} (allowing all)", robots_url, e);
            RobotsPolicy::allow_all()
        }
    }
}
