/*!
# IO utilities

Snapshot saving and loading.

The corpus builder only knows about [SnapshotStore]: [FileStore] persists snapshots as a JSON array on disk,
[MemoryStore] keeps them in memory.
!*/
mod store;
pub use store::{FileStore, MemoryStore, SnapshotStore, WriteGuard};
