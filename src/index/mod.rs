//! Word occurrence index
//!
//! Aggregates per-article word sets into a document-frequency index:
//! - Entries keep first-encounter order, so equal frequencies sort stably
//! - Sorting ranks words by how many articles mention them
//! - CSV export with one row per distinct word

use crate::types::{ArticleDocument, ArticleId};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// One distinct word and the articles that mention it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// The word surface form
    pub word: String,
    /// Ids of every article whose body contained the word
    pub articles: Vec<ArticleId>,
}

impl WordEntry {
    /// Number of articles the word appeared in.
    pub fn document_frequency(&self) -> usize {
        self.articles.len()
    }
}

/// Document-frequency index over gathered articles.
///
/// Entries stay in first-encounter order until sorted for output. Each
/// article contributes a word at most once because [`ArticleDocument`]
/// already deduplicates its word list.
#[derive(Debug, Default, Clone)]
pub struct WordIndex {
    entries: Vec<WordEntry>,
    positions: HashMap<String, usize>,
}

impl WordIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one article's words into the index.
    pub fn fold(&mut self, doc: &ArticleDocument) {
        for word in doc.words() {
            match self.positions.get(word) {
                Some(&pos) => self.entries[pos].articles.push(doc.id),
                None => {
                    self.positions.insert(word.clone(), self.entries.len());
                    self.entries.push(WordEntry {
                        word: word.clone(),
                        articles: vec![doc.id],
                    });
                }
            }
        }
    }

    /// Number of distinct words indexed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-encounter order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Consume the index, returning entries sorted by descending document
    /// frequency. The sort is stable, so ties keep first-encounter order.
    pub fn into_sorted_entries(self) -> Vec<WordEntry> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.document_frequency().cmp(&a.document_frequency()));
        entries
    }

    /// Write the sorted index as CSV.
    ///
    /// Columns are `word`, `document_frequency`, and `article_id_list`
    /// (comma-joined ids, quoted by the writer when needed).
    pub fn write_csv(self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create output file '{}'", path.display()))?;

        writer
            .write_record(["word", "document_frequency", "article_id_list"])
            .context("Failed to write CSV header")?;

        for entry in self.into_sorted_entries() {
            let frequency = entry.document_frequency().to_string();
            let ids = entry
                .articles
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writer
                .write_record([entry.word.as_str(), frequency.as_str(), ids.as_str()])
                .with_context(|| format!("Failed to write CSV row for word '{}'", entry.word))?;
        }

        writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(id: ArticleId, words: &[&str]) -> ArticleDocument {
        ArticleDocument::from_words(id, words.iter().copied())
    }

    #[test]
    fn test_fold_counts_document_frequency() {
        let mut index = WordIndex::new();
        index.fold(&doc(1, &["car", "engine"]));
        index.fold(&doc(2, &["car", "wheel"]));
        index.fold(&doc(3, &["engine"]));

        assert_eq!(index.len(), 3);
        let entries = index.entries();
        assert_eq!(entries[0].word, "car");
        assert_eq!(entries[0].articles, vec![1, 2]);
        assert_eq!(entries[1].word, "engine");
        assert_eq!(entries[1].articles, vec![1, 3]);
        assert_eq!(entries[2].word, "wheel");
        assert_eq!(entries[2].articles, vec![2]);
    }

    #[test]
    fn test_sorted_entries_break_ties_by_first_encounter() {
        let mut index = WordIndex::new();
        index.fold(&doc(1, &["car", "engine"]));
        index.fold(&doc(2, &["car", "wheel"]));
        index.fold(&doc(3, &["engine"]));

        let sorted = index.into_sorted_entries();
        let words: Vec<&str> = sorted.iter().map(|e| e.word.as_str()).collect();
        // car and engine both appear in two articles; car was seen first
        assert_eq!(words, vec!["car", "engine", "wheel"]);
        assert_eq!(sorted[0].document_frequency(), 2);
        assert_eq!(sorted[1].document_frequency(), 2);
        assert_eq!(sorted[2].document_frequency(), 1);
    }

    #[test]
    fn test_deduplicated_document_contributes_once() {
        let mut index = WordIndex::new();
        // ArticleDocument drops the repeated surface before fold sees it
        index.fold(&doc(9, &["car", "car", "car"]));

        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].articles, vec![9]);
        assert_eq!(index.entries()[0].document_frequency(), 1);
    }

    #[test]
    fn test_empty_index() {
        let index = WordIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.into_sorted_entries().is_empty());
    }

    #[test]
    fn test_write_csv_exact_output() {
        let mut index = WordIndex::new();
        index.fold(&doc(1, &["car", "engine"]));
        index.fold(&doc(2, &["car", "wheel"]));
        index.fold(&doc(3, &["engine"]));

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.csv");
        index.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "word,document_frequency,article_id_list\n\
             car,2,\"1,2\"\n\
             engine,2,\"1,3\"\n\
             wheel,1,2\n"
        );
    }

    #[test]
    fn test_write_csv_single_id_unquoted() {
        let mut index = WordIndex::new();
        index.fold(&doc(42, &["tire"]));

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.csv");
        index.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "word,document_frequency,article_id_list\ntire,1,42\n"
        );
    }
}
