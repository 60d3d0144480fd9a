//! Crawl orchestration over a contiguous article-id range
//!
//! Articles are dispatched to a bounded worker pool; results stream back
//! over a channel and are folded into the index one document at a time
//! once every worker has finished. Dispatch stops early when any worker
//! reports a forbidden response or the volume ceiling is crossed, while
//! articles already in flight are still drained and kept.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::index::WordIndex;
use crate::scraping::article::{fetch_article, ArticleOutcome};
use crate::scraping::context::{CrawlContext, StopReason};
use crate::types::ArticleId;

/// Counters for the end-of-run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Articles handed to a worker
    pub dispatched: u64,
    /// Articles that produced a document
    pub documents: u64,
    /// Articles whose first page was a 404
    pub missing: u64,
    /// Articles dropped for errors or empty content
    pub skipped: u64,
    /// Articles that hit a 401/403
    pub forbidden: u64,
}

/// Everything a finished crawl hands back to the caller
#[derive(Debug)]
pub struct CrawlReport {
    /// Aggregated word index over every completed document
    pub index: WordIndex,
    /// Outcome counters
    pub stats: CrawlStats,
    /// Why dispatching stopped
    pub reason: StopReason,
}

/// Bounded-concurrency dispatcher for an article-id range
pub struct CrawlCoordinator {
    ctx: Arc<CrawlContext>,
    workers: usize,
    volume_ceiling: u64,
}

impl CrawlCoordinator {
    /// Create a coordinator. A ceiling of 0 disables the volume check.
    pub fn new(ctx: Arc<CrawlContext>, workers: usize, volume_ceiling_bytes: u64) -> Self {
        Self {
            ctx,
            workers: workers.max(1),
            volume_ceiling: volume_ceiling_bytes,
        }
    }

    /// Crawl the inclusive id range and aggregate every returned document.
    pub async fn run(&self, start: ArticleId, end: ArticleId) -> CrawlReport {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut stats = CrawlStats::default();

        info!(
            "crawling articles {}..={} with {} workers",
            start, end, self.workers
        );

        for id in start..=end {
            if self.ctx.state.is_cancelled() {
                debug!("dispatch stopped before article {}", id);
                break;
            }
            let permit = match semaphore.clone().try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => match semaphore.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };
            // The flag may have flipped while waiting for a slot
            if self.ctx.state.is_cancelled() {
                debug!("dispatch stopped before article {}", id);
                break;
            }

            stats.dispatched += 1;
            let ctx = Arc::clone(&self.ctx);
            let tx = tx.clone();
            let ceiling = self.volume_ceiling;
            tokio::spawn(async move {
                let _permit = permit;
                let outcome = fetch_article(&ctx, id).await;
                match &outcome {
                    ArticleOutcome::Document(doc) => {
                        let total = ctx.state.add_volume(doc.word_bytes());
                        if ceiling > 0 && total >= ceiling {
                            ctx.state.request_stop(StopReason::VolumeCeiling);
                        }
                    }
                    ArticleOutcome::Forbidden => {
                        ctx.state.request_stop(StopReason::Forbidden);
                    }
                    _ => {}
                }
                let _ = tx.send((id, outcome));
            });
        }

        // Workers hold the remaining senders; dropping ours lets the
        // drain below end once they all finish
        drop(tx);

        let mut documents = Vec::new();
        while let Some((id, outcome)) = rx.recv().await {
            match outcome {
                ArticleOutcome::Document(doc) => {
                    stats.documents += 1;
                    documents.push(doc);
                }
                ArticleOutcome::Missing => {
                    stats.missing += 1;
                    debug!("article {} does not exist", id);
                }
                ArticleOutcome::Skipped => {
                    stats.skipped += 1;
                }
                ArticleOutcome::Forbidden => {
                    stats.forbidden += 1;
                    warn!("article {} was forbidden", id);
                }
            }
        }

        // Sequential reduction, after the pool has fully drained
        let mut index = WordIndex::new();
        for doc in &documents {
            index.fold(doc);
        }

        let reason = self
            .ctx
            .state
            .stop_reason()
            .unwrap_or(StopReason::RangeExhausted);
        info!(
            "crawl finished: {} documents, {} missing, {} skipped, {} forbidden ({})",
            stats.documents, stats.missing, stats.skipped, stats.forbidden, reason
        );

        CrawlReport {
            index,
            stats,
            reason,
        }
    }
}
