use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for webharvest
///
/// Every field has a default, so a config file is optional and may set only
/// the tables it cares about. CLI flags override file values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub assets: AssetConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of link hops to follow from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Global cap on simultaneous in-flight fetches. The default of 1 is
    /// the serial politeness baseline.
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_concurrent_fetches: 1,
            fetch_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
///
/// Servers may reject unidentified clients, so every request carries a
/// client-agent header built from these fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler, appended as a comment when set
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "webharvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the identifying user-agent string
    pub fn user_agent_string(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            )
        }
    }
}

/// Asset download configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Filename extensions treated as downloadable assets. Matching is a
    /// case-sensitive suffix test on the URL path, never content sniffing.
    pub extensions: Vec<String>,

    /// Directory asset files are written into
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".pdf".to_string(), ".jpg".to_string(), ".png".to_string()],
            output_dir: PathBuf::from("./downloads"),
        }
    }
}
