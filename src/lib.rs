/*! # readme-corpus

Builds a corpus of repository readmes labeled with their primary language, and normalizes it for modeling.

- [pipelines::CorpusBuilder] discovers repositories, fetches their pages and keeps the resulting
  [record::CorpusSnapshot] in an [io::SnapshotStore].
- [pipelines::Normalizer] derives folded, lemmatized and stemmed variants of each record's text.
!*/
pub mod config;
pub mod download;
pub mod error;
pub mod filtering;
pub mod io;
pub mod markup;
pub mod pipelines;
pub mod record;
pub mod sources;
pub mod transformers;
