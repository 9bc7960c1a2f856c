use crate::config::types::Config;
use crate::ConfigError;

/// Validates a configuration after parsing
///
/// Checks the constraints TOML's type system cannot express: positive
/// limits, a non-empty identifying agent, and well-formed extension
/// entries.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "max-concurrent-fetches must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.user_agent.crawler_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name must not be empty".to_string(),
        ));
    }

    if config.assets.extensions.is_empty() {
        return Err(ConfigError::Validation(
            "at least one asset extension is required".to_string(),
        ));
    }

    for ext in &config.assets.extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "asset extension {:?} must start with '.' and name a suffix",
                ext
            )));
        }
    }

    Ok(())
}
