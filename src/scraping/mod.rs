//! Archive crawling subsystem
//!
//! Implements the full path from article id to gathered words:
//! - `fetcher`: retrying HTTP transport with outcome classification
//! - `politeness`: randomized delay after every request
//! - `validator`: payload classification ahead of parsing
//! - `extractor`: cascading article-body extraction
//! - `article`: per-article pagination walk
//! - `context`: state shared by every worker
//! - `coordinator`: bounded-concurrency dispatch over the id range

pub mod article;
pub mod context;
pub mod coordinator;
pub mod extractor;
pub mod fetcher;
pub mod politeness;
pub mod validator;

pub use article::{fetch_article, ArticleOutcome};
pub use context::{CrawlContext, CrawlState, StopReason};
pub use coordinator::{CrawlCoordinator, CrawlReport, CrawlStats};
pub use extractor::ArticleExtractor;
pub use fetcher::{FetchConfig, FetchEngine, FetchError, PageFetchOutcome, PageSource};
pub use politeness::RateLimiter;
pub use validator::{classify, ContentKind};

use crate::types::ArticleId;

/// Build the URL for one page of an article.
///
/// Page 1 is the bare article URL; later pages append the page number.
pub fn page_url(base_url: &str, id: ArticleId, page: u32) -> String {
    let base = base_url.trim_end_matches('/');
    if page <= 1 {
        format!("{}/{}", base, id)
    } else {
        format!("{}/{}/{}", base, id, page)
    }
}
