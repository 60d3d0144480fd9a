//! Per-article pagination walk
//!
//! An article lives at `{base}/{id}` with continuation pages at
//! `{base}/{id}/{n}`. The walk fetches pages in order and accumulates
//! distinct words until the page cap, a repeated payload, the end of
//! pagination, or a terminal error.

use std::sync::Arc;

use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::scraping::context::CrawlContext;
use crate::scraping::fetcher::PageFetchOutcome;
use crate::scraping::page_url;
use crate::scraping::validator::{classify, ContentKind};
use crate::tokenizer::noun_surfaces;
use crate::types::{ArticleDocument, ArticleId, ContentHash};
use crate::util::snippet;

/// Result of walking one article
#[derive(Debug, Clone)]
pub enum ArticleOutcome {
    /// At least one word was gathered
    Document(ArticleDocument),
    /// Page 1 does not exist; the article was never published
    Missing,
    /// The article exists but produced nothing worth keeping
    Skipped,
    /// The archive answered 401/403 for one of the pages
    Forbidden,
}

/// Walk an article's pages in order, gathering distinct words.
///
/// Invalid payloads skip their page without ending the walk; a 404 past
/// page 1 is the normal end of pagination and keeps what was gathered.
pub async fn fetch_article(ctx: &CrawlContext, id: ArticleId) -> ArticleOutcome {
    let mut doc = ArticleDocument::new(id);
    let mut last_hash: Option<ContentHash> = None;

    for page in 1..=ctx.max_pages {
        let url = page_url(&ctx.base_url, id, page);
        let outcome = match ctx.source.fetch_page(&url).await {
            PageFetchOutcome::Success(body) => match classify(&body) {
                ContentKind::Html => PageFetchOutcome::Success(body),
                kind => {
                    let preview = String::from_utf8_lossy(&body);
                    debug!(
                        "{} served a {:?} payload, skipping page: {}",
                        url,
                        kind,
                        snippet(&preview, 60)
                    );
                    PageFetchOutcome::InvalidContent
                }
            },
            other => other,
        };

        match outcome {
            PageFetchOutcome::Success(body) => {
                let text = String::from_utf8_lossy(&body).into_owned();
                let hash = xxh3_64(text.as_bytes());
                if last_hash == Some(hash) {
                    debug!("{} repeats the previous page, ending pagination", url);
                    break;
                }
                last_hash = Some(hash);

                let extractor = Arc::clone(&ctx.extractor);
                let tokenizer = Arc::clone(&ctx.tokenizer);
                let parsed = tokio::task::spawn_blocking(move || {
                    extractor
                        .extract(&text)
                        .map(|body_text| noun_surfaces(tokenizer.as_ref(), &body_text))
                })
                .await;

                match parsed {
                    Ok(Some(words)) => {
                        for word in words {
                            doc.add_word(word);
                        }
                    }
                    Ok(None) => debug!("{} has no extractable article body", url),
                    Err(err) => warn!("{} extraction task failed: {}", url, err),
                }
            }
            // Not HTML; move on to the next page
            PageFetchOutcome::InvalidContent => continue,
            PageFetchOutcome::NotFound => {
                if page == 1 {
                    return ArticleOutcome::Missing;
                }
                // Ran past the last page; keep what we have
                break;
            }
            PageFetchOutcome::Forbidden => {
                warn!("{} is forbidden, abandoning article {}", url, id);
                return ArticleOutcome::Forbidden;
            }
            PageFetchOutcome::ServerError => {
                warn!("{} server error, skipping article {}", url, id);
                return ArticleOutcome::Skipped;
            }
            PageFetchOutcome::NetworkError => {
                warn!("{} network error, skipping article {}", url, id);
                return ArticleOutcome::Skipped;
            }
        }
    }

    if doc.is_empty() {
        ArticleOutcome::Skipped
    } else {
        debug!("article {} gathered {} distinct words", id, doc.len());
        ArticleOutcome::Document(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::extractor::ArticleExtractor;
    use crate::scraping::fetcher::PageSource;
    use crate::tokenizer::SimpleTokenizer;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const BASE: &str = "https://archive.test/post";

    struct ScriptedSource {
        pages: HashMap<String, PageFetchOutcome>,
    }

    impl ScriptedSource {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
            }
        }

        fn with(mut self, url: &str, outcome: PageFetchOutcome) -> Self {
            self.pages.insert(url.to_string(), outcome);
            self
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, url: &str) -> PageFetchOutcome {
            self.pages
                .get(url)
                .cloned()
                .unwrap_or(PageFetchOutcome::NotFound)
        }
    }

    fn html_page(words: &str) -> PageFetchOutcome {
        PageFetchOutcome::Success(
            format!(
                "<html><body><article><div class=\"article__content\"><p>{}</p></div></article></body></html>",
                words
            )
            .into_bytes(),
        )
    }

    fn context(source: ScriptedSource) -> CrawlContext {
        CrawlContext::new(
            Arc::new(source),
            ArticleExtractor::new(),
            Arc::new(SimpleTokenizer),
            BASE,
            5,
        )
    }

    fn doc_words(outcome: ArticleOutcome) -> Vec<String> {
        match outcome {
            ArticleOutcome::Document(doc) => doc.words().to_vec(),
            other => panic!("expected a document, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_page_article() {
        let source = ScriptedSource::new().with(
            &format!("{}/7", BASE),
            html_page("electric cars"),
        );
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(doc_words(outcome), vec!["electric", "cars"]);
    }

    #[tokio::test]
    async fn test_multi_page_accumulates_and_dedups() {
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), html_page("car engine"))
            .with(&format!("{}/7/2", BASE), html_page("wheel car"));
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(doc_words(outcome), vec!["car", "engine", "wheel"]);
    }

    #[tokio::test]
    async fn test_missing_article() {
        let outcome = fetch_article(&context(ScriptedSource::new()), 42).await;
        assert!(matches!(outcome, ArticleOutcome::Missing));
    }

    #[tokio::test]
    async fn test_duplicate_page_stops_pagination() {
        let repeated = html_page("beta");
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), html_page("alpha"))
            .with(&format!("{}/7/2", BASE), repeated.clone())
            .with(&format!("{}/7/3", BASE), repeated)
            .with(&format!("{}/7/4", BASE), html_page("gamma"));
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(doc_words(outcome), vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_forbidden_page_abandons_article() {
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), html_page("alpha"))
            .with(&format!("{}/7/2", BASE), PageFetchOutcome::Forbidden);
        let outcome = fetch_article(&context(source), 7).await;
        assert!(matches!(outcome, ArticleOutcome::Forbidden));
    }

    #[tokio::test]
    async fn test_server_error_skips_article() {
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), PageFetchOutcome::ServerError);
        let outcome = fetch_article(&context(source), 7).await;
        assert!(matches!(outcome, ArticleOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_network_error_drops_partial_words() {
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), html_page("alpha"))
            .with(&format!("{}/7/2", BASE), PageFetchOutcome::NetworkError);
        let outcome = fetch_article(&context(source), 7).await;
        assert!(matches!(outcome, ArticleOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_binary_page_does_not_end_the_walk() {
        let source = ScriptedSource::new()
            .with(
                &format!("{}/7", BASE),
                PageFetchOutcome::Success(b"\xff\xd8\xff\xe0 jpeg bytes".to_vec()),
            )
            .with(&format!("{}/7/2", BASE), html_page("survivor"));
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(doc_words(outcome), vec!["survivor"]);
    }

    #[tokio::test]
    async fn test_invalid_page_preserves_duplicate_detection() {
        // The jpeg page must not disturb the last-seen hash, so page 3
        // (identical to page 1) still terminates the walk.
        let first = html_page("alpha");
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), first.clone())
            .with(
                &format!("{}/7/2", BASE),
                PageFetchOutcome::Success(b"%PDF-1.4 not markup".to_vec()),
            )
            .with(&format!("{}/7/3", BASE), first)
            .with(&format!("{}/7/4", BASE), html_page("gamma"));
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(doc_words(outcome), vec!["alpha"]);
    }

    #[tokio::test]
    async fn test_page_cap_is_respected() {
        let source = ScriptedSource::new()
            .with(&format!("{}/7", BASE), html_page("one"))
            .with(&format!("{}/7/2", BASE), html_page("two"))
            .with(&format!("{}/7/3", BASE), html_page("three"))
            .with(&format!("{}/7/4", BASE), html_page("four"))
            .with(&format!("{}/7/5", BASE), html_page("five"))
            .with(&format!("{}/7/6", BASE), html_page("six"));
        let outcome = fetch_article(&context(source), 7).await;
        assert_eq!(
            doc_words(outcome),
            vec!["one", "two", "three", "four", "five"]
        );
    }

    #[tokio::test]
    async fn test_page_without_body_yields_skip() {
        let source = ScriptedSource::new().with(
            &format!("{}/7", BASE),
            PageFetchOutcome::Success(b"<html><body><span>nothing here</span></body></html>".to_vec()),
        );
        let outcome = fetch_article(&context(source), 7).await;
        assert!(matches!(outcome, ArticleOutcome::Skipped));
    }
}
