//! Transform trait and token sequence.
use std::fmt;

use itertools::Itertools;

/// Ordered sequence of tokens.
///
/// Stages pass [Tokens] to each other, and the sequence is only joined back
/// into a single-space separated string at the pipeline boundary (see [Tokens::join]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Split on whitespace.
    pub fn from_whitespace(text: &str) -> Self {
        Self(text.split_whitespace().map(String::from).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Join tokens with single spaces.
    pub fn join(&self) -> String {
        self.0.iter().join(" ")
    }

    /// Apply `f` to each token, keeping the token count.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(String) -> String,
    {
        Self(self.0.into_iter().map(f).collect())
    }

    /// Keep tokens for which `f` returns `true`, preserving order.
    pub fn retain<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        self.0.retain(|t| f(t.as_str()));
        self
    }
}

impl From<Vec<String>> for Tokens {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl FromIterator<String> for Tokens {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join())
    }
}

pub trait Transform {
    /// Takes ownership of [Tokens] and returns them.
    fn transform_own(&self, tokens: Tokens) -> Tokens;
}

#[cfg(test)]
mod tests {
    use super::Tokens;

    #[test]
    fn join_uses_single_spaces() {
        let t = Tokens::from_whitespace("  foo \t bar\nbaz ");
        assert_eq!(t.len(), 3);
        assert_eq!(t.join(), "foo bar baz");
        assert_eq!(t.to_string(), "foo bar baz");
    }

    #[test]
    fn empty_joins_to_empty() {
        assert_eq!(Tokens::from_whitespace("   ").join(), "");
    }
}
