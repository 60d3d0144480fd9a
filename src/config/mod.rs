//! Configuration for the crawldex crawler

mod crawl;
mod http;
mod logging;

pub use crawl::CrawlConfig;
pub use http::HttpConfig;
pub use logging::{LogLevel, LoggingConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Browser-shaped user agent sent with archive requests
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Main configuration for a crawl run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Crawl range and output configuration
    #[serde(default)]
    pub crawl: CrawlConfig,
    /// HTTP transport configuration
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass rather than playing whack-a-mole.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Crawl validation
        match Url::parse(&self.crawl.base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    errors.push(format!(
                        "base_url must use http or https, got '{}'",
                        url.scheme()
                    ));
                }
            }
            Err(e) => errors.push(format!("base_url is not a valid URL: {}", e)),
        }
        if self.crawl.workers == 0 {
            errors.push("workers must be positive".to_string());
        }
        if self.crawl.max_pages_per_article == 0 {
            errors.push("max_pages_per_article must be positive".to_string());
        }
        if self.crawl.output_path.as_os_str().is_empty() {
            errors.push("output_path must not be empty".to_string());
        }

        // HTTP validation
        if self.http.retry_attempts == 0 {
            errors.push("retry_attempts must be positive".to_string());
        }
        if self.http.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }
        if self.http.backoff_base_ms == 0 {
            errors.push("backoff_base_ms must be positive".to_string());
        }
        if self.http.delay_min_ms > self.http.delay_max_ms {
            errors.push(format!(
                "delay_min_ms ({}) must not exceed delay_max_ms ({})",
                self.http.delay_min_ms, self.http.delay_max_ms
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
