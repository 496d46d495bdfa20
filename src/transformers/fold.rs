//! Case and accent folding.
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD_RE: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Fold `text` into lowercase ASCII words.
///
/// 1. lowercase, collapse whitespace runs
/// 1. NFKD-decompose and drop what is not ASCII (combining accents included)
/// 1. replace anything that is neither a word character nor whitespace by a space
/// 1. collapse whitespace again and trim
///
/// The result only holds `[a-z0-9_]` and single spaces.
pub fn fold(text: &str) -> String {
    let lower = text.to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lower, " ");

    // some compatibility decompositions yield uppercase ASCII (e.g. U+210C)
    let ascii: String = collapsed
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let words = NON_WORD_RE.replace_all(&ascii, " ");
    words.split_whitespace().collect::<Vec<_>>().join(" ")
}
