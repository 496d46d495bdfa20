/*! GitHub-like code host.

- [discovery] walks the ranked search pages and lists repository identifiers (`owner/name`).
- [repository] reads a repository page into a [crate::record::RawRecord].

Both only rely on class selectors, see [crate::markup].
!*/
pub mod discovery;
pub mod repository;

pub use discovery::{discover, Discovery};
pub use repository::fetch;
