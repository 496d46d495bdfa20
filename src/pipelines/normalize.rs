//! Record normalization.
//!
//! # Processing
//! 1. The raw content (or the readme sentinel when there is none) is kept as `original`.
//! 1. It is folded (lowercase ASCII words) and tokenized.
//! 1. The ordered [Stage]s are run on the tokens. Stages before [Stage::Reduce]
//!    are run once and shared by both variants, so that stopwords are filtered on the
//!    tokens as they were before lemmatization/stemming.
//! 1. The remaining stages are run once per [Reduction], producing the `lemmatized` and `stemmed` variants.
//!
//! Records are independent from each other: [Normalizer::normalize_corpus] runs on the rayon
//! thread pool and keeps the input order.
use std::collections::HashMap;

use itertools::Itertools;
use rayon::prelude::*;

use crate::filtering::StopWordPolicy;
use crate::record::{NormalizedRecord, RawRecord};
use crate::transformers::{
    fold, tokenize, Lemmatizer, RemoveStopwords, Stemmer, StripDigits, StripNonAlphabetic,
    Tokens, Transform,
};

/// A normalization step on tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RemoveStopwords,
    /// lemmatize or stem, depending on the produced variant
    Reduce,
    StripDigits,
    StripNonAlphabetic,
}

/// Stopword removal operates on unreduced tokens, and stripping comes last so that
/// stopwords are matched before their characters are altered.
pub const DEFAULT_STAGES: [Stage; 4] = [
    Stage::RemoveStopwords,
    Stage::Reduce,
    Stage::StripDigits,
    Stage::StripNonAlphabetic,
];

/// Token reduction applied by [Stage::Reduce].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Lemmatize,
    Stem,
}

/// Normalizes records with a fixed stopword policy and stage order.
pub struct Normalizer {
    stages: Vec<Stage>,
    stopwords: RemoveStopwords,
    lemmatizer: Lemmatizer,
    stemmer: Stemmer,
}

impl Normalizer {
    /// [DEFAULT_STAGES] with the provided stopword policy.
    pub fn new(policy: &StopWordPolicy) -> Self {
        Self::with_stages(policy, DEFAULT_STAGES.to_vec())
    }

    /// Custom stage order.
    ///
    /// When `stages` has no [Stage::Reduce], both variants are equal.
    pub fn with_stages(policy: &StopWordPolicy, stages: Vec<Stage>) -> Self {
        Self {
            stages,
            stopwords: RemoveStopwords::from_policy(policy),
            lemmatizer: Lemmatizer,
            stemmer: Stemmer::default(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn run_stage(&self, stage: Stage, reduction: Reduction, tokens: Tokens) -> Tokens {
        match (stage, reduction) {
            (Stage::RemoveStopwords, _) => self.stopwords.transform_own(tokens),
            (Stage::Reduce, Reduction::Lemmatize) => self.lemmatizer.transform_own(tokens),
            (Stage::Reduce, Reduction::Stem) => self.stemmer.transform_own(tokens),
            (Stage::StripDigits, _) => StripDigits.transform_own(tokens),
            (Stage::StripNonAlphabetic, _) => StripNonAlphabetic.transform_own(tokens),
        }
    }

    /// Normalize `text` into its lemmatized and stemmed variants.
    pub fn normalize_text(&self, text: &str) -> (String, String) {
        let tokens = tokenize(&fold(text));

        // stages up to the reduction are shared between variants
        let split = self
            .stages
            .iter()
            .position(|stage| *stage == Stage::Reduce)
            .unwrap_or(self.stages.len());
        let (shared, branched) = self.stages.split_at(split);

        // the reduction does not matter before Stage::Reduce
        let tokens = shared.iter().fold(tokens, |tokens, stage| {
            self.run_stage(*stage, Reduction::Lemmatize, tokens)
        });

        let variant = |reduction: Reduction| {
            branched
                .iter()
                .fold(tokens.clone(), |tokens, stage| {
                    self.run_stage(*stage, reduction, tokens)
                })
                .join()
        };

        (variant(Reduction::Lemmatize), variant(Reduction::Stem))
    }

    /// Normalize a single record. The record itself is left untouched.
    pub fn normalize_record(&self, record: &RawRecord) -> NormalizedRecord {
        let original = record.content_or_sentinel().to_string();
        let (lemmatized, stemmed) = self.normalize_text(&original);
        NormalizedRecord {
            title: record.title().to_string(),
            language: record.language().map(String::from),
            original,
            lemmatized,
            stemmed,
        }
    }

    /// Normalize records in parallel, keeping their order.
    pub fn normalize_corpus(&self, records: &[RawRecord]) -> Vec<NormalizedRecord> {
        records
            .par_iter()
            .map(|record| self.normalize_record(record))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&StopWordPolicy::default())
    }
}

/// Normalize `record` with the baseline stopwords, plus `extra`, minus `exclude`.
pub fn normalize_record(
    record: &RawRecord,
    extra: &[String],
    exclude: &[String],
) -> NormalizedRecord {
    let policy = StopWordPolicy::new(extra.to_vec(), exclude.to_vec());
    Normalizer::new(&policy).normalize_record(record)
}

/// Normalize `records`, keeping their order.
pub fn normalize_corpus(
    records: &[RawRecord],
    extra: &[String],
    exclude: &[String],
) -> Vec<NormalizedRecord> {
    let policy = StopWordPolicy::new(extra.to_vec(), exclude.to_vec());
    Normalizer::new(&policy).normalize_corpus(records)
}

/// Fold, tokenize, lemmatize and remove stopwords (baseline plus `extra`).
pub fn clean(text: &str, extra: &[String]) -> String {
    let policy = StopWordPolicy::new(extra.to_vec(), vec![]);
    let tokens = Lemmatizer.transform_own(tokenize(&fold(text)));
    RemoveStopwords::from_policy(&policy)
        .transform_own(tokens)
        .join()
}

/// Count stems of the whitespace-separated words of `text`.
///
/// Sorted by decreasing count, ties by stem.
pub fn stem_frequencies(text: &str) -> Vec<(String, usize)> {
    let stemmer = Stemmer::default();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in text.split_whitespace() {
        *counts.entry(stemmer.stem_token(word)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .sorted_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)))
        .collect()
}
