//! Removes stopwords from a token sequence.
use crate::filtering::{Filter, StopWordPolicy, StopWords};

use super::{Tokens, Transform};

/// Drops tokens that are detected by a [StopWords] set, keeping the order of the survivors.
#[derive(Default)]
pub struct RemoveStopwords {
    filter: StopWords,
}

impl RemoveStopwords {
    pub fn new(filter: StopWords) -> Self {
        Self { filter }
    }

    pub fn from_policy(policy: &StopWordPolicy) -> Self {
        Self::new(StopWords::from_policy(policy))
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.filter
    }
}

impl Transform for RemoveStopwords {
    fn transform_own(&self, tokens: Tokens) -> Tokens {
        tokens.retain(|token| !self.filter.detect(token))
    }
}

/// Remove the baseline stopwords, plus `extra`, minus `exclude`.
pub fn remove_stopwords<E, X>(tokens: Tokens, extra: &[E], exclude: &[X]) -> Tokens
where
    E: AsRef<str>,
    X: AsRef<str>,
{
    RemoveStopwords::new(StopWords::with_adjustments(extra, exclude)).transform_own(tokens)
}
