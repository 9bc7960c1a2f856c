//! Crawler module for page fetching and asset harvesting
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with error classification
//! - HTML link and asset extraction
//! - The explicit depth-bounded work list
//! - Streamed asset downloads
//! - Overall crawl coordination

mod coordinator;
mod downloader;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{Coordinator, StopHandle};
pub use downloader::{DownloadOutcome, Downloader};
pub use extractor::{extract, Extracted};
pub use fetcher::{build_http_client, fetch_page, is_html, FetchResult};
pub use frontier::{CrawlTask, Frontier};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::url::CrawlUrl;
use crate::HarvestError;

/// Runs a complete crawl from a seed URL
///
/// Convenience entry point over [`Coordinator`] for callers that don't
/// need a cancellation handle.
pub async fn crawl(config: Config, seed: CrawlUrl) -> Result<CrawlReport, HarvestError> {
    let mut coordinator = Coordinator::new(config, seed)?;
    coordinator.run().await
}
