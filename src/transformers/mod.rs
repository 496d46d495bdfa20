/*! Token transformers.

Normalization stages, from raw text to filtered, reduced tokens.

[fold] and [tokenize] turn text into [Tokens], then each stage is a [Transform] that takes ownership of [Tokens] and returns them.
Every stage is total: no input makes them fail, and empty input yields empty output.

!*/

mod fold;
mod lemmatize;
mod stem;
mod stopword_filter;
mod strip;
mod tokenize;
mod transform;

pub use fold::fold;
pub use lemmatize::{lemmatize, Lemmatizer};
pub use stem::{stem, Stemmer};
pub use stopword_filter::{remove_stopwords, RemoveStopwords};
pub use strip::{StripDigits, StripNonAlphabetic};
pub use tokenize::tokenize;
pub use transform::{Tokens, Transform};
