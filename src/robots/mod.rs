//! Robots.txt handling module
//!
//! This module fetches, parses, and caches per-site crawl-exclusion
//! policies. Policies are cached for the lifetime of a crawl run, with at
//! most one robots.txt fetch per site, and default to allow-all whenever a
//! policy cannot be obtained.

mod cache;
mod parser;

pub use cache::PolicyStore;
pub use parser::RobotsPolicy;
