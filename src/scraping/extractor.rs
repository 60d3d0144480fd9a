//! Article body extraction
//!
//! Real-world archive pages vary in markup, so extraction walks an ordered
//! cascade of strategies from most to least specific:
//! 1. Known body containers inside an `<article>` element
//! 2. The whole `<article>` when it holds enough paragraphs
//! 3. Known body containers anywhere in the document
//! 4. A generic `[itemprop="articleBody"]`, `<main>`, or `<article>` match
//! 5. The paragraph-densest `<div>` with enough text
//!
//! The first strategy producing non-empty text wins.

use scraper::{ElementRef, Html, Selector};

/// Body-container selectors, most specific first
const CONTENT_SELECTORS: [&str; 4] = [
    "div.article__content",
    "div.article-body",
    "div.entry-content",
    "div[itemprop=\"articleBody\"]",
];

/// Generic fallback for pages without a recognized body container
const GENERIC_SELECTOR: &str = "[itemprop=\"articleBody\"], main, article";

/// Paragraphs required to accept a whole `<article>` as the body
const ARTICLE_MIN_PARAGRAPHS: usize = 3;
/// Paragraphs required for the density heuristic to consider a div
const HEURISTIC_MIN_PARAGRAPHS: usize = 5;
/// Characters required for the density heuristic to accept a div
const HEURISTIC_MIN_CHARS: usize = 300;

/// Cascading article-body extractor with precompiled selectors
pub struct ArticleExtractor {
    content_selectors: Vec<Selector>,
    article: Option<Selector>,
    paragraph: Option<Selector>,
    div: Option<Selector>,
    generic: Option<Selector>,
}

impl ArticleExtractor {
    pub fn new() -> Self {
        let content_selectors = CONTENT_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect();

        Self {
            content_selectors,
            article: Selector::parse("article").ok(),
            paragraph: Selector::parse("p").ok(),
            div: Selector::parse("div").ok(),
            generic: Selector::parse(GENERIC_SELECTOR).ok(),
        }
    }

    /// Extract the article body text, or `None` when no strategy matches.
    pub fn extract(&self, html: &str) -> Option<String> {
        let doc = Html::parse_document(html);

        // Strategies 1 and 2 are scoped to the first <article> element
        if let Some(article_sel) = &self.article {
            if let Some(article) = doc.select(article_sel).next() {
                let article_text = element_text(article);
                if !article_text.is_empty() {
                    for content_sel in &self.content_selectors {
                        if let Some(el) = article.select(content_sel).next() {
                            let text = element_text(el);
                            if !text.is_empty() {
                                return Some(text);
                            }
                        }
                    }
                    if let Some(p_sel) = &self.paragraph {
                        if article.select(p_sel).count() >= ARTICLE_MIN_PARAGRAPHS {
                            return Some(article_text);
                        }
                    }
                }
            }
        }

        // Strategy 3: body containers anywhere in the document
        for content_sel in &self.content_selectors {
            if let Some(el) = doc.select(content_sel).next() {
                let text = element_text(el);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }

        // Strategy 4: generic semantic containers
        if let Some(generic_sel) = &self.generic {
            if let Some(el) = doc.select(generic_sel).next() {
                let text = element_text(el);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }

        // Strategy 5: paragraph-density heuristic
        self.densest_div(&doc)
    }

    /// Best `<div>` by paragraph count among those with at least
    /// `HEURISTIC_MIN_PARAGRAPHS` paragraphs and `HEURISTIC_MIN_CHARS`
    /// characters of text. Ties keep the earlier div.
    fn densest_div(&self, doc: &Html) -> Option<String> {
        let div_sel = self.div.as_ref()?;
        let p_sel = self.paragraph.as_ref()?;

        let mut best: Option<String> = None;
        let mut best_paragraphs = 0;
        for div in doc.select(div_sel) {
            let paragraphs = div.select(p_sel).count();
            if paragraphs < HEURISTIC_MIN_PARAGRAPHS || paragraphs <= best_paragraphs {
                continue;
            }
            let text = element_text(div);
            if text.chars().count() >= HEURISTIC_MIN_CHARS {
                best_paragraphs = paragraphs;
                best = Some(text);
            }
        }
        best
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Join an element's text nodes with single spaces, dropping blank fragments.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
