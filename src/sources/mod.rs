/*! Corpus sources.

A source knows where repositories are listed and how their pages read.
Fetching itself goes through [crate::download::PageFetcher].
!*/
pub mod github;
