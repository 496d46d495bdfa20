//! Pipelines.
//!
//! - [normalize] turns raw records into their normalized variants.
//! - [corpus] acquires (or loads) a corpus snapshot.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by [corpus::CorpusBuilder].
pub mod corpus;
pub mod normalize;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use corpus::{BuildReport, CorpusBuilder};
pub use normalize::{normalize_corpus, normalize_record, Normalizer, Reduction, Stage};
pub use pipeline::Pipeline;
