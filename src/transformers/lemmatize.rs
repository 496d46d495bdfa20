//! Dictionary-based noun lemmatization.
//!
//! Tokens are lowercased, then reduced the way WordNet's morphy does for nouns:
//! the candidate lemmas are the irregular forms of the token, the token itself, and the
//! results of the noun detachment rules (`-ies` → `-y`, `-ches` → `-ch`, `-s` → ``, ...).
//! Only candidates found in the noun lexicon (or the irregular table) are kept, and the
//! shortest one wins. Tokens without any known candidate are returned unchanged.
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::{Tokens, Transform};

/// One noun lemma per line.
const NOUN_LEXICON: &str = include_str!("../../data/noun_lemmas.txt");

lazy_static! {
    static ref LEXICON: HashSet<&'static str> = NOUN_LEXICON
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("people", "people"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("oxen", "ox"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("analyses", "analysis"),
        ("bases", "base"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("hypotheses", "hypothesis"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("quizzes", "quiz"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("knives", "knife"),
        ("lives", "life"),
        ("wives", "wife"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("selves", "self"),
        ("thieves", "thief"),
        ("loaves", "loaf"),
    ]
    .into_iter()
    .collect();
}

/// WordNet noun detachment rules.
const NOUN_RULES: [(&str, &str); 9] = [
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    /// Is `word` a known noun lemma?
    pub fn is_lemma(&self, word: &str) -> bool {
        LEXICON.contains(word)
    }

    pub fn lemmatize_token(&self, token: &str) -> String {
        let token = token.to_lowercase();

        let mut candidates: Vec<String> = Vec::new();
        if let Some(lemma) = IRREGULAR.get(token.as_str()) {
            candidates.push(lemma.to_string());
        }
        if self.is_lemma(&token) {
            candidates.push(token.clone());
        }
        for (suffix, replacement) in NOUN_RULES.iter() {
            if let Some(stem) = token.strip_suffix(suffix) {
                let candidate = format!("{}{}", stem, replacement);
                if self.is_lemma(&candidate) {
                    candidates.push(candidate);
                }
            }
        }

        candidates
            .into_iter()
            .min_by_key(|candidate| candidate.chars().count())
            .unwrap_or(token)
    }
}

impl Transform for Lemmatizer {
    fn transform_own(&self, tokens: Tokens) -> Tokens {
        tokens.map(|token| self.lemmatize_token(&token))
    }
}

/// Lemmatize each token. The token count is preserved.
pub fn lemmatize(tokens: Tokens) -> Tokens {
    Lemmatizer.transform_own(tokens)
}
