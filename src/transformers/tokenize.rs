//! Word tokenization.
use unicode_segmentation::UnicodeSegmentation;

use super::Tokens;

/// Split `text` on Unicode word boundaries (UAX #29).
///
/// Whitespace segments are dropped, punctuation is kept as separate tokens
/// and contractions (`don't`) stay whole.
pub fn tokenize(text: &str) -> Tokens {
    text.split_word_bounds()
        .filter(|segment| !segment.trim().is_empty())
        .map(String::from)
        .collect()
}
