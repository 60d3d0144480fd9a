//! Tokenizer adapter for part-of-speech aware word extraction
//!
//! The crawl pipeline only cares about noun surfaces, so taggers of any
//! provenance plug in behind the `Tokenizer` trait and reduce their tag
//! set to `PosCategory`.

use unicode_segmentation::UnicodeSegmentation;

/// Grammatical category of a token, reduced to what the pipeline needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosCategory {
    /// The leading part-of-speech tag named a noun
    Noun,
    /// Any other recognized tag
    Other,
    /// Missing or malformed tag data
    Unknown,
}

/// A surface form paired with its part-of-speech category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub pos: PosCategory,
}

impl Token {
    pub fn new(surface: impl Into<String>, pos: PosCategory) -> Self {
        Self {
            surface: surface.into(),
            pos,
        }
    }
}

/// Adapter over a morphological tokenizer.
///
/// Implementations map their tagger's leading part-of-speech tag onto
/// `PosCategory`. Entries with unusable tag data must come back as
/// `PosCategory::Unknown` so the noun filter drops them deterministically
/// instead of crashing the page.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Noun surfaces of `text`, in emission order.
pub fn noun_surfaces(tokenizer: &dyn Tokenizer, text: &str) -> Vec<String> {
    tokenizer
        .tokenize(text)
        .into_iter()
        .filter(|t| t.pos == PosCategory::Noun)
        .map(|t| t.surface)
        .collect()
}

/// Word-boundary tokenizer that treats every word as a content word.
///
/// Stand-in for deployments without a morphological tagger; each Unicode
/// word is tagged as a noun so the noun filter passes it through.
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.unicode_words()
            .map(|w| Token::new(w, PosCategory::Noun))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTokens(Vec<Token>);

    impl Tokenizer for FixedTokens {
        fn tokenize(&self, _text: &str) -> Vec<Token> {
            self.0.clone()
        }
    }

    #[test]
    fn test_simple_tokenizer_splits_on_word_boundaries() {
        let tokens = SimpleTokenizer.tokenize("The car, the engine.");
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["The", "car", "the", "engine"]);
        assert!(tokens.iter().all(|t| t.pos == PosCategory::Noun));
    }

    #[test]
    fn test_simple_tokenizer_on_empty_input() {
        assert!(SimpleTokenizer.tokenize("").is_empty());
        assert!(SimpleTokenizer.tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_noun_surfaces_keeps_only_nouns() {
        let tagger = FixedTokens(vec![
            Token::new("engine", PosCategory::Noun),
            Token::new("runs", PosCategory::Other),
            Token::new("smoothly", PosCategory::Other),
            Token::new("wheel", PosCategory::Noun),
        ]);
        assert_eq!(noun_surfaces(&tagger, "ignored"), vec!["engine", "wheel"]);
    }

    #[test]
    fn test_noun_surfaces_drops_unknown_tags() {
        let tagger = FixedTokens(vec![
            Token::new("garbled", PosCategory::Unknown),
            Token::new("car", PosCategory::Noun),
            Token::new("???", PosCategory::Unknown),
        ]);
        assert_eq!(noun_surfaces(&tagger, "ignored"), vec!["car"]);
    }

    #[test]
    fn test_noun_surfaces_preserves_emission_order() {
        let tagger = FixedTokens(vec![
            Token::new("zeta", PosCategory::Noun),
            Token::new("alpha", PosCategory::Noun),
            Token::new("mu", PosCategory::Noun),
        ]);
        assert_eq!(noun_surfaces(&tagger, "ignored"), vec!["zeta", "alpha", "mu"]);
    }
}
