//! Crawl run report
//!
//! Run-scoped counters the coordinator fills in as branches complete,
//! printed when the run ends.

use crate::state::{SkipReason, TaskOutcome};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Pages for which a fetch was issued (successful or not)
    pub pages_fetched: u64,

    /// Pages fetched and extracted successfully
    pub pages_extracted: u64,

    /// Tasks dropped before fetch (depth, visited, robots)
    pub pages_skipped: u64,

    /// Tasks denied by a robots policy (subset of pages_skipped)
    pub pages_robots_denied: u64,

    /// Fetched branches that terminated without extraction
    pub pages_failed: u64,

    /// Assets written to disk
    pub assets_saved: u64,

    /// Assets that could not be saved
    pub assets_failed: u64,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration, set by `finish`
    pub elapsed: Duration,

    start_instant: Instant,
}

impl CrawlReport {
    /// Creates an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            pages_extracted: 0,
            pages_skipped: 0,
            pages_robots_denied: 0,
            pages_failed: 0,
            assets_saved: 0,
            assets_failed: 0,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            start_instant: Instant::now(),
        }
    }

    /// Records one task outcome
    pub fn record(&mut self, outcome: &TaskOutcome) {
        if outcome.was_fetched() {
            self.pages_fetched += 1;
        }
        match outcome {
            TaskOutcome::Extracted => self.pages_extracted += 1,
            TaskOutcome::Skipped(reason) => {
                self.pages_skipped += 1;
                if matches!(reason, SkipReason::RobotsDenied) {
                    self.pages_robots_denied += 1;
                }
            }
            TaskOutcome::Failed(_) => self.pages_failed += 1,
        }
    }

    /// Adds asset download counts from a finished branch
    pub fn add_assets(&mut self, saved: u64, failed: u64) {
        self.assets_saved += saved;
        self.assets_failed += failed;
    }

    /// Stamps the elapsed wall-clock time
    pub fn finish(&mut self) {
        self.elapsed = self.start_instant.elapsed();
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!(
        "Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Elapsed: {:.1?}", report.elapsed);
    println!();

    println!("Pages:");
    println!("  Fetched:   {}", report.pages_fetched);
    println!("  Extracted: {}", report.pages_extracted);
    println!("  Failed:    {}", report.pages_failed);
    println!(
        "  Skipped:   {} ({} by robots policy)",
        report.pages_skipped, report.pages_robots_denied
    );
    println!();

    println!("Assets:");
    println!("  Saved:  {}", report.assets_saved);
    println!("  Failed: {}", report.assets_failed);
}
