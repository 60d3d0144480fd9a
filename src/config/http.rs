//! HTTP transport configuration

use serde::{Deserialize, Serialize};

use super::DEFAULT_USER_AGENT;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User agent string sent with every request
    pub user_agent: String,
    /// Total request timeout (seconds)
    pub request_timeout_secs: u64,
    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Attempts per page before giving up (first try included)
    pub retry_attempts: u32,
    /// Base backoff between retries (milliseconds, doubled per attempt)
    pub backoff_base_ms: u64,
    /// Lower bound of the politeness delay after each request (milliseconds)
    pub delay_min_ms: u64,
    /// Upper bound of the politeness delay after each request (milliseconds)
    pub delay_max_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 15,
            connect_timeout_secs: 10,
            max_redirects: 10,
            retry_attempts: 5,
            backoff_base_ms: 1000,
            delay_min_ms: 400,
            delay_max_ms: 1200,
        }
    }
}
