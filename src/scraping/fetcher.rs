//! HTTP fetch engine for archive pages
//!
//! Wraps a pooled reqwest client with:
//! - Retries with exponential backoff on transient statuses and transport errors
//! - Classification of terminal responses into page outcomes
//! - A politeness pause after every fetch, however the request ended

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{HttpConfig, DEFAULT_USER_AGENT};
use crate::scraping::politeness::RateLimiter;

/// Statuses worth another attempt. Access rejections (401/403) are
/// terminal and never retried.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Errors that can occur while building the fetch engine
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Terminal outcome of fetching one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetchOutcome {
    /// 2xx response with the raw body
    Success(Vec<u8>),
    /// 404
    NotFound,
    /// 401 or 403
    Forbidden,
    /// 5xx after retries were exhausted
    ServerError,
    /// Transport failure, timeout, or an unclassified status
    NetworkError,
    /// Body failed payload validation; set by the page loop after the fetch
    InvalidContent,
}

/// Source of archive pages.
///
/// The production implementation is `FetchEngine`; tests substitute
/// scripted sources so the crawl logic runs without a network.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page and classify the response. Never fails: every
    /// failure mode is an outcome variant.
    async fn fetch_page(&self, url: &str) -> PageFetchOutcome;
}

/// Configuration for the fetch engine
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Attempts per page, first try included
    pub retry_attempts: u32,
    /// Base backoff between attempts, doubled each retry
    pub backoff_base: Duration,
    /// Lower politeness delay bound
    pub delay_min: Duration,
    /// Upper politeness delay bound
    pub delay_max: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            retry_attempts: 5,
            backoff_base: Duration::from_millis(1000),
            delay_min: Duration::from_millis(400),
            delay_max: Duration::from_millis(1200),
        }
    }
}

impl FetchConfig {
    /// Build from the TOML-level HTTP configuration.
    pub fn from_config(http: &HttpConfig) -> Self {
        Self {
            user_agent: http.user_agent.clone(),
            timeout: Duration::from_secs(http.request_timeout_secs),
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            max_redirects: http.max_redirects,
            retry_attempts: http.retry_attempts,
            backoff_base: Duration::from_millis(http.backoff_base_ms),
            delay_min: Duration::from_millis(http.delay_min_ms),
            delay_max: Duration::from_millis(http.delay_max_ms),
        }
    }
}

/// Retrying HTTP fetcher with browser-shaped request headers
pub struct FetchEngine {
    http_client: reqwest::Client,
    limiter: RateLimiter,
    config: FetchConfig,
}

impl FetchEngine {
    /// Create a new fetch engine.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("ja,en;q=0.8"),
        );
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_static("https://www.google.com/"),
        );

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()?;

        let limiter = RateLimiter::new(config.delay_min, config.delay_max);

        Ok(Self {
            http_client,
            limiter,
            config,
        })
    }

    async fn fetch_with_retry(&self, url: &str) -> PageFetchOutcome {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.http_client.get(url).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if is_retryable(status) && attempt < self.config.retry_attempts {
                        debug!(
                            "{} returned {} (attempt {}/{}), backing off",
                            url, status, attempt, self.config.retry_attempts
                        );
                        tokio::time::sleep(backoff_delay(self.config.backoff_base, attempt)).await;
                        continue;
                    }
                    return self.read_outcome(url, response).await;
                }
                Err(err) => {
                    if attempt < self.config.retry_attempts {
                        debug!(
                            "{} failed: {} (attempt {}/{}), backing off",
                            url, err, attempt, self.config.retry_attempts
                        );
                        tokio::time::sleep(backoff_delay(self.config.backoff_base, attempt)).await;
                        continue;
                    }
                    warn!("{} failed after {} attempts: {}", url, attempt, err);
                    return PageFetchOutcome::NetworkError;
                }
            }
        }
    }

    async fn read_outcome(&self, url: &str, response: reqwest::Response) -> PageFetchOutcome {
        let status = response.status().as_u16();
        match classify_status(status) {
            None => match response.bytes().await {
                Ok(body) => PageFetchOutcome::Success(body.to_vec()),
                Err(err) => {
                    warn!("{} body read failed: {}", url, err);
                    PageFetchOutcome::NetworkError
                }
            },
            Some(outcome) => {
                debug!("{} returned {}", url, status);
                outcome
            }
        }
    }
}

#[async_trait]
impl PageSource for FetchEngine {
    async fn fetch_page(&self, url: &str) -> PageFetchOutcome {
        let outcome = self.fetch_with_retry(url).await;
        // One pause per page, whatever the outcome was
        self.limiter.pause().await;
        outcome
    }
}

fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Map a terminal status to its outcome. `None` means success; the caller
/// still has to read the body.
fn classify_status(status: u16) -> Option<PageFetchOutcome> {
    match status {
        200..=299 => None,
        404 => Some(PageFetchOutcome::NotFound),
        401 | 403 => Some(PageFetchOutcome::Forbidden),
        500.. => Some(PageFetchOutcome::ServerError),
        _ => Some(PageFetchOutcome::NetworkError),
    }
}

/// Backoff before the next attempt: base, then doubled per completed attempt.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}
