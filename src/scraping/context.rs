//! Shared state threaded through every crawl worker
//!
//! The context bundles the page source, extractor, and tokenizer with the
//! crawl-wide stop flag so article workers take one handle instead of a
//! parameter list that grows with every feature.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::scraping::extractor::ArticleExtractor;
use crate::scraping::fetcher::PageSource;
use crate::tokenizer::Tokenizer;

/// Why a crawl stopped dispatching articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every id in the requested range was dispatched
    RangeExhausted,
    /// The archive answered 401/403; the crawl backed off entirely
    Forbidden,
    /// Gathered words crossed the configured volume ceiling
    VolumeCeiling,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RangeExhausted => "range exhausted",
            Self::Forbidden => "archive refused access",
            Self::VolumeCeiling => "volume ceiling reached",
        };
        f.write_str(s)
    }
}

/// Crawl-wide cancellation flag and volume counter.
///
/// The flag only ever flips from running to stopped, and the first caller
/// to request a stop owns the recorded reason.
#[derive(Debug, Default)]
pub struct CrawlState {
    cancelled: AtomicBool,
    volume: AtomicU64,
    reason: Mutex<Option<StopReason>>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Stop dispatching new articles. The first recorded reason wins;
    /// later calls only reassert the flag.
    pub fn request_stop(&self, reason: StopReason) {
        {
            let mut slot = self.reason.lock();
            if slot.is_none() {
                *slot = Some(reason);
            }
        }
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Add gathered bytes to the running volume, returning the new total.
    pub fn add_volume(&self, bytes: u64) -> u64 {
        self.volume.fetch_add(bytes, Ordering::Relaxed) + bytes
    }

    pub fn volume(&self) -> u64 {
        self.volume.load(Ordering::Relaxed)
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        *self.reason.lock()
    }
}

/// Everything an article worker needs, shared behind one `Arc`
pub struct CrawlContext {
    /// Source of archive pages
    pub source: Arc<dyn PageSource>,
    /// Article body extractor
    pub extractor: Arc<ArticleExtractor>,
    /// Tokenizer adapter
    pub tokenizer: Arc<dyn Tokenizer>,
    /// Archive base URL
    pub base_url: String,
    /// Pagination cap per article
    pub max_pages: u32,
    /// Shared stop flag and volume counter
    pub state: CrawlState,
}

impl CrawlContext {
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: ArticleExtractor,
        tokenizer: Arc<dyn Tokenizer>,
        base_url: impl Into<String>,
        max_pages: u32,
    ) -> Self {
        Self {
            source,
            extractor: Arc::new(extractor),
            tokenizer,
            base_url: base_url.into(),
            max_pages,
            state: CrawlState::new(),
        }
    }
}
