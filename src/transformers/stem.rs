//! Porter-style stemming.
use rust_stemmers::Algorithm;

use super::{Tokens, Transform};

/// Snowball English (Porter2) stemmer, applied independently on each token.
pub struct Stemmer {
    inner: rust_stemmers::Stemmer,
}

impl Stemmer {
    pub fn stem_token(&self, token: &str) -> String {
        if token.is_empty() {
            return String::new();
        }
        self.inner.stem(token).into_owned()
    }
}

impl Default for Stemmer {
    fn default() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Transform for Stemmer {
    fn transform_own(&self, tokens: Tokens) -> Tokens {
        tokens.map(|token| self.stem_token(&token))
    }
}

/// Stem each token. The token count is preserved.
pub fn stem(tokens: Tokens) -> Tokens {
    Stemmer::default().transform_own(tokens)
}
