//! Pipeline trait.
use crate::error::Error;

/// A runnable corpus pipeline, generic over what it produces.
///
/// [crate::pipelines::CorpusBuilder] produces a [crate::record::CorpusSnapshot],
/// honoring its configured cache usage.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
