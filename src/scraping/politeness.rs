//! Politeness delays between archive requests
//!
//! Every request to the archive is followed by a randomized pause so the
//! crawl never hits the host in a regular rhythm, regardless of how the
//! request itself turned out.

use rand::Rng;
use std::time::Duration;

/// Randomized delay source with inclusive millisecond bounds
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_ms: u64,
    max_ms: u64,
}

impl RateLimiter {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min_ms: min.as_millis() as u64,
            max_ms: max.as_millis() as u64,
        }
    }

    /// Draw a fresh delay within the configured bounds.
    pub fn sample(&self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Sleep for a freshly drawn delay.
    pub async fn pause(&self) {
        tokio::time::sleep(self.sample()).await;
    }
}
