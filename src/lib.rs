//! Crawldex: word-frequency crawler for numerically indexed article archives
//!
//! Walks a contiguous range of article ids against an archive whose URLs
//! follow a `base/{id}` and `base/{id}/{page}` scheme, featuring:
//! - Retrying HTTP fetch with browser-like headers and outcome classification
//! - Randomized politeness pause after every request
//! - Content validation and cascading article-body extraction
//! - Morphological tokenization filtered down to noun surfaces
//! - Per-article pagination walk with duplicate-page detection
//! - Bounded-concurrency dispatch with cooperative cancellation
//! - Document-frequency word index exported as CSV

pub mod config;
pub mod index;
pub mod scraping;
pub mod tokenizer;
pub mod types;
pub mod util;

pub use config::Config;
pub use types::*;
