/*! Token filtering utilities

Filters operate on single tokens and implement [filter::Filter]:
filters do not have state, so that two successive equal inputs yield two equal outputs.

- [stopwords::StopWords] detects stopwords, following a configurable [stopwords::StopWordPolicy].
! */
mod filter;
pub mod stopwords;

pub use filter::Filter;
pub use stopwords::{StopWordPolicy, StopWords};
