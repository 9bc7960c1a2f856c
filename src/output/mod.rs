//! Output module
//!
//! End-of-run reporting for a crawl.

mod report;

pub use report::{print_report, CrawlReport};
