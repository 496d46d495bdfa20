//! English stopwords.
//!
//! The baseline list is the usual 179-word English list (lowercase, including the
//! clitic forms `don't`, `should've`, ... and their apostrophe-less halves `don`, `ve`, ...).
//!
//! The baseline can be adjusted with a [StopWordPolicy]: `extra` words are added,
//! then `exclude` words are removed.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Filter;

const ENGLISH: [&str; 179] = [
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Adjustments applied on top of the baseline list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopWordPolicy {
    /// words to add to the baseline
    #[serde(default)]
    pub extra: Vec<String>,
    /// words to remove from the baseline (applied after `extra`)
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl StopWordPolicy {
    pub fn new(extra: Vec<String>, exclude: Vec<String>) -> Self {
        Self { extra, exclude }
    }
}

/// Stopword set. Matching is case-sensitive and exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build the stopword set for the provided policy.
    pub fn from_policy(policy: &StopWordPolicy) -> Self {
        Self::with_adjustments(&policy.extra, &policy.exclude)
    }

    /// Baseline, plus `extra`, minus `exclude`.
    pub fn with_adjustments<E, X>(extra: &[E], exclude: &[X]) -> Self
    where
        E: AsRef<str>,
        X: AsRef<str>,
    {
        let mut words: HashSet<String> = ENGLISH.iter().map(|w| w.to_string()).collect();
        words.extend(extra.iter().map(|w| w.as_ref().to_string()));
        for word in exclude {
            words.remove(word.as_ref());
        }
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    /// Baseline English list, unadjusted.
    fn default() -> Self {
        Self {
            words: ENGLISH.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Filter<&str> for StopWords {
    /// `true` if `token` is a stopword.
    fn detect(&self, token: &str) -> bool {
        self.contains(token)
    }
}
