//! Core types shared across the crawl pipeline

use std::collections::HashSet;

/// Numeric article identifier, taken from the archive URL path
pub type ArticleId = u64;

/// 64-bit digest of a page's decoded text, used for duplicate detection
pub type ContentHash = u64;

/// Distinct words gathered from every page of one article.
///
/// Words keep first-encounter order so downstream aggregation stays
/// deterministic for a given completion order.
#[derive(Debug, Clone)]
pub struct ArticleDocument {
    /// Identifier of the article these words came from
    pub id: ArticleId,
    words: Vec<String>,
    seen: HashSet<String>,
}

impl ArticleDocument {
    pub fn new(id: ArticleId) -> Self {
        Self {
            id,
            words: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Build a document from an iterator of words, deduplicating as it goes.
    pub fn from_words<I, S>(id: ArticleId, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut doc = Self::new(id);
        for word in words {
            doc.add_word(word.into());
        }
        doc
    }

    /// Record a word once; repeats are ignored.
    pub fn add_word(&mut self, word: String) {
        if self.seen.contains(&word) {
            return;
        }
        self.seen.insert(word.clone());
        self.words.push(word);
    }

    /// Words in first-encounter order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total UTF-8 byte length of the gathered words, for volume accounting.
    pub fn word_bytes(&self) -> u64 {
        self.words.iter().map(|w| w.len() as u64).sum()
    }
}
