//! Crawl coordinator - main crawl orchestration logic
//!
//! Owns the crawl loop: pops tasks off the frontier, applies the pre-fetch
//! gates (depth budget, visited set, robots policy), runs fetch/extract
//! branches under a global politeness cap, dispatches asset downloads, and
//! feeds discovered links back into the frontier.

use crate::config::Config;
use crate::crawler::downloader::{DownloadOutcome, Downloader};
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_page, is_html, FetchResult};
use crate::crawler::frontier::{CrawlTask, Frontier};
use crate::output::CrawlReport;
use crate::robots::PolicyStore;
use crate::state::{FailureKind, SkipReason, TaskOutcome, VisitedSet};
use crate::url::CrawlUrl;
use crate::HarvestError;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Handle for cancelling a running crawl
///
/// Raising the flag stops the coordinator from issuing new fetches;
/// fetches already in flight are allowed to finish.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Requests that the crawl stop issuing new fetches
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once a stop has been requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What one completed crawl branch reports back to the run loop
struct BranchResult {
    url: CrawlUrl,
    outcome: TaskOutcome,
    children: Vec<CrawlTask>,
    assets_saved: u64,
    assets_failed: u64,
}

impl BranchResult {
    fn bare(url: CrawlUrl, outcome: TaskOutcome) -> Self {
        Self {
            url,
            outcome,
            children: Vec::new(),
            assets_saved: 0,
            assets_failed: 0,
        }
    }
}

/// Main crawl coordinator
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    robots: Arc<PolicyStore>,
    visited: Arc<VisitedSet>,
    downloader: Arc<Downloader>,
    seed: CrawlUrl,
    semaphore: Arc<Semaphore>,
    stop: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a coordinator for one crawl run
    ///
    /// Builds the shared HTTP client, the run-scoped robots cache and
    /// visited set, and ensures the asset output directory exists.
    pub fn new(config: Config, seed: CrawlUrl) -> Result<Self, HarvestError> {
        crate::config::validate(&config)?;

        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.fetch_timeout_secs),
        )?;
        let downloader = Downloader::new(client.clone(), &config.assets.output_dir)?;
        let robots = PolicyStore::new(client.clone());
        let semaphore = Arc::new(Semaphore::new(config.crawler.max_concurrent_fetches as usize));

        Ok(Self {
            config: Arc::new(config),
            client,
            robots: Arc::new(robots),
            visited: Arc::new(VisitedSet::new()),
            downloader: Arc::new(downloader),
            seed,
            semaphore,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a handle that can cancel this crawl from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.stop.clone())
    }

    /// Runs the crawl to completion and returns the run report
    ///
    /// The only fatal condition is a fetch failure on the seed URL itself;
    /// every other error terminates its branch, is logged, and leaves
    /// sibling branches running.
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        tracing::info!(
            "Starting crawl of {} (max depth {}, {} concurrent fetch(es))",
            self.seed,
            self.config.crawler.max_depth,
            self.config.crawler.max_concurrent_fetches
        );

        let mut frontier = Frontier::new();
        let mut in_flight: JoinSet<BranchResult> = JoinSet::new();
        let mut report = CrawlReport::new();

        // The seed's budget covers its own fetch plus max_depth link hops;
        // a task popped with budget 0 is skipped before fetch.
        frontier.push(CrawlTask::new(
            self.seed.clone(),
            self.config.crawler.max_depth.saturating_add(1),
        ));

        loop {
            if !self.stop.load(Ordering::SeqCst) {
                self.dispatch_ready(&mut frontier, &mut in_flight, &mut report);
            }

            match in_flight.join_next().await {
                Some(Ok(branch)) => self.absorb_branch(branch, &mut frontier, &mut report)?,
                Some(Err(e)) => tracing::error!("Crawl branch aborted: {}", e),
                None => {
                    if self.stop.load(Ordering::SeqCst) || frontier.is_empty() {
                        break;
                    }
                }
            }
        }

        if self.stop.load(Ordering::SeqCst) {
            tracing::warn!("Crawl cancelled; {} task(s) left unprocessed", frontier.len());
        }

        report.finish();
        tracing::info!(
            "Crawl finished: {} page(s) fetched, {} asset(s) saved",
            report.pages_fetched,
            report.assets_saved
        );
        Ok(report)
    }

    /// Drains the frontier, spawning a branch per task that passes the
    /// synchronous pre-fetch gates
    ///
    /// The depth and visited checks happen here, before spawning, so a URL
    /// discovered twice in quick succession still fetches at most once.
    fn dispatch_ready(
        &self,
        frontier: &mut Frontier,
        in_flight: &mut JoinSet<BranchResult>,
        report: &mut CrawlReport,
    ) {
        while let Some(task) = frontier.pop() {
            if task.remaining_depth == 0 {
                tracing::debug!("Skipping {} (depth budget exhausted)", task.url);
                report.record(&TaskOutcome::Skipped(SkipReason::DepthExhausted));
                continue;
            }

            if !self.visited.try_mark(&task.url) {
                tracing::trace!("Skipping {} (already visited)", task.url);
                report.record(&TaskOutcome::Skipped(SkipReason::AlreadyVisited));
                continue;
            }

            let client = self.client.clone();
            let robots = self.robots.clone();
            let visited = self.visited.clone();
            let downloader = self.downloader.clone();
            let root = self.seed.clone();
            let extensions = self.config.assets.extensions.clone();
            let semaphore = self.semaphore.clone();

            in_flight.spawn(async move {
                // The permit caps simultaneous in-flight requests globally,
                // robots fetches and asset downloads included.
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return BranchResult::bare(
                            task.url,
                            TaskOutcome::Failed(FailureKind::Transport(
                                "crawl shut down".to_string(),
                            )),
                        )
                    }
                };
                process_branch(client, robots, visited, downloader, root, extensions, task).await
            });
        }
    }

    /// Records a finished branch and queues its discovered links
    fn absorb_branch(
        &self,
        branch: BranchResult,
        frontier: &mut Frontier,
        report: &mut CrawlReport,
    ) -> Result<(), HarvestError> {
        report.record(&branch.outcome);
        report.add_assets(branch.assets_saved, branch.assets_failed);

        if let TaskOutcome::Failed(kind) = &branch.outcome {
            if kind.is_fetch_error() && branch.url == self.seed {
                return Err(HarvestError::SeedFailed {
                    url: branch.url.to_string(),
                    cause: kind.to_string(),
                });
            }
        }

        for child in branch.children {
            frontier.push(child);
        }

        Ok(())
    }
}

/// Processes one crawl task: robots gate, fetch, extract, download
///
/// State transitions per task: `Pending -> Fetching -> {Extracted |
/// Skipped | Failed}`. Runs inside a spawned tokio task under the global
/// concurrency permit.
async fn process_branch(
    client: Client,
    robots: Arc<PolicyStore>,
    visited: Arc<VisitedSet>,
    downloader: Arc<Downloader>,
    root: CrawlUrl,
    extensions: Vec<String>,
    task: CrawlTask,
) -> BranchResult {
    if !robots.is_allowed(&task.url).await {
        tracing::info!("Skipping {} (disallowed by robots policy)", task.url);
        return BranchResult::bare(task.url, TaskOutcome::Skipped(SkipReason::RobotsDenied));
    }

    tracing::debug!("Fetching {}", task.url);
    match fetch_page(&client, &task.url).await {
        FetchResult::HttpError { status } => {
            tracing::warn!("Fetch of {} returned HTTP {}", task.url, status);
            BranchResult::bare(task.url, TaskOutcome::Failed(FailureKind::Http(status)))
        }

        FetchResult::TransportError { cause } => {
            tracing::warn!("Fetch of {} failed: {}", task.url, cause);
            BranchResult::bare(task.url, TaskOutcome::Failed(FailureKind::Transport(cause)))
        }

        FetchResult::Success {
            content_type, body, ..
        } => {
            if !is_html(&content_type) {
                tracing::debug!("Nothing to extract from {} ({})", task.url, content_type);
                return BranchResult::bare(
                    task.url,
                    TaskOutcome::Failed(FailureKind::NotHtml(content_type)),
                );
            }

            let extracted = extract(&task.url, &root, &body, &extensions);
            tracing::debug!(
                "Extracted {} link(s) and {} asset(s) from {}",
                extracted.links.len(),
                extracted.assets.len(),
                task.url
            );

            let mut assets_saved = 0;
            let mut assets_failed = 0;
            for asset in extracted.assets {
                // Assets share the visited set, so one asset referenced
                // from many pages downloads once per run.
                if !visited.try_mark(&asset) {
                    continue;
                }
                match downloader.download(&asset).await {
                    DownloadOutcome::Saved { path } => {
                        tracing::info!("Saved {} to {}", asset, path.display());
                        assets_saved += 1;
                    }
                    DownloadOutcome::Failed { cause } => {
                        tracing::warn!("Failed to save {}: {}", asset, cause);
                        assets_failed += 1;
                    }
                }
            }

            let children = extracted
                .links
                .into_iter()
                .map(|url| task.child(url))
                .collect();

            BranchResult {
                url: task.url,
                outcome: TaskOutcome::Extracted,
                children,
                assets_saved,
                assets_failed,
            }
        }
    }
}
