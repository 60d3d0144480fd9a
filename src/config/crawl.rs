//! Crawl range and output configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Crawl behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Archive base URL; article pages live at `{base_url}/{id}` and
    /// `{base_url}/{id}/{page}`
    pub base_url: String,
    /// Maximum concurrent article workers
    pub workers: usize,
    /// Pagination cap per article
    pub max_pages_per_article: u32,
    /// Stop dispatching new articles once gathered words exceed this many
    /// bytes (0 disables the ceiling)
    pub volume_ceiling_bytes: u64,
    /// Output CSV path
    pub output_path: PathBuf,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kuruma-news.jp/post".to_string(),
            workers: 8,
            max_pages_per_article: 40,
            volume_ceiling_bytes: 16 * 1024 * 1024,
            output_path: PathBuf::from("word_occurrences.csv"),
        }
    }
}
