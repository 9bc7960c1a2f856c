//! Configuration module
//!
//! Crawl parameters come from an optional TOML file plus CLI overrides;
//! every field has a sensible default.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{AssetConfig, Config, CrawlerConfig, UserAgentConfig};
pub use validation::validate;
