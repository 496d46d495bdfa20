//! Character stripping.
//!
//! Both transforms drop the tokens that end up empty, so that
//! a digit-only token does not leave a double space behind.
use super::{Tokens, Transform};

/// Deletes ASCII digits.
#[derive(Default)]
pub struct StripDigits;

/// Deletes every character outside of `[A-Za-z]`.
#[derive(Default)]
pub struct StripNonAlphabetic;

fn strip_and_drop_empty<F>(tokens: Tokens, keep: F) -> Tokens
where
    F: Fn(char) -> bool,
{
    tokens
        .into_inner()
        .into_iter()
        .map(|token| token.chars().filter(|c| keep(*c)).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

impl Transform for StripDigits {
    fn transform_own(&self, tokens: Tokens) -> Tokens {
        strip_and_drop_empty(tokens, |c| !c.is_ascii_digit())
    }
}

impl Transform for StripNonAlphabetic {
    fn transform_own(&self, tokens: Tokens) -> Tokens {
        strip_and_drop_empty(tokens, |c| c.is_ascii_alphabetic())
    }
}
