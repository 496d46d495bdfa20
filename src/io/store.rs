/*! Snapshot stores.

Writes are all-or-nothing: [FileStore] serializes into a temporary file next to the target,
then renames it over the target. A failed write leaves the previous snapshot in place.

Writers hold a [WriteGuard] for the whole build, taken with [SnapshotStore::lock] before anything
is fetched. For [FileStore] it is an in-process [Mutex] plus an advisory lock on `<snapshot>.lock`
(taken without waiting, so that a second writer fails fast with [Error::Locked]).
The advisory lock is released by the OS when the process exits, so a killed build never leaves
the store locked. The lock file itself stays on disk.
!*/
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, TryLockError};

use fs2::FileExt;
use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::Error;
use crate::record::CorpusSnapshot;

/// Where snapshots are kept.
pub trait SnapshotStore: Send + Sync {
    /// Is there a snapshot to load?
    fn exists(&self) -> bool;

    /// Load the stored snapshot, as is.
    ///
    /// A stored snapshot that can't be decoded is an [Error::CorruptSnapshot].
    fn load(&self) -> Result<CorpusSnapshot, Error>;

    /// Take the write lock, or fail with [Error::Locked] if another writer holds it.
    fn lock(&self) -> Result<WriteGuard<'_>, Error>;

    /// Replace the stored snapshot, under a guard obtained from [SnapshotStore::lock].
    fn write(&self, snapshot: &CorpusSnapshot, guard: &WriteGuard<'_>) -> Result<(), Error>;

    /// Lock, then replace the stored snapshot.
    fn save(&self, snapshot: &CorpusSnapshot) -> Result<(), Error> {
        let guard = self.lock()?;
        self.write(snapshot, &guard)
    }
}

/// Exclusive write access to a store, released on drop.
pub struct WriteGuard<'a> {
    _local: MutexGuard<'a, ()>,
    _file: Option<LockFile>,
}

fn try_local<'a>(lock: &'a Mutex<()>, path: &Path) -> Result<MutexGuard<'a, ()>, Error> {
    match lock.try_lock() {
        Ok(guard) => Ok(guard),
        Err(TryLockError::WouldBlock) => Err(Error::Locked(path.to_path_buf())),
        Err(TryLockError::Poisoned(_)) => {
            Err(Error::Custom("snapshot write lock poisoned".to_string()))
        }
    }
}

/// Advisory lock on a lock file, unlocked on drop.
struct LockFile {
    file: File,
    path: PathBuf,
}

impl LockFile {
    fn acquire(path: PathBuf) -> Result<Self, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("acquired {:?}", path);
                Ok(Self { file, path })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(Error::Locked(path)),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("could not unlock {:?}: {}", self.path, e);
        }
    }
}

/// JSON snapshot at a fixed path.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Directory holding the snapshot (where temporary files go).
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::CorruptSnapshot {
            path: self.path.clone(),
            reason,
        }
    }
}

impl SnapshotStore for FileStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<CorpusSnapshot, Error> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::InvalidData => return Err(self.corrupt(e.to_string())),
            Err(e) => return Err(e.into()),
        };
        let snapshot: CorpusSnapshot =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        info!("loaded {} records from {:?}", snapshot.len(), self.path);
        Ok(snapshot)
    }

    fn lock(&self) -> Result<WriteGuard<'_>, Error> {
        let local = try_local(&self.write_lock, &self.path)?;
        std::fs::create_dir_all(self.dir())?;
        let file = LockFile::acquire(self.lock_path())?;
        Ok(WriteGuard {
            _local: local,
            _file: Some(file),
        })
    }

    fn write(&self, snapshot: &CorpusSnapshot, _guard: &WriteGuard<'_>) -> Result<(), Error> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, snapshot)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        info!("saved {} records to {:?}", snapshot.len(), self.path);
        Ok(())
    }
}

/// In-memory store. Snapshots are kept serialized, so that loading goes through the same decoding as [FileStore].
#[derive(Default)]
pub struct MemoryStore {
    serialized: Mutex<Option<String>>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    /// Start from an already serialized snapshot.
    pub fn with_serialized(serialized: String) -> Self {
        Self {
            serialized: Mutex::new(Some(serialized)),
            write_lock: Mutex::new(()),
        }
    }

    /// Current serialized snapshot, if any.
    pub fn serialized(&self) -> Option<String> {
        self.serialized.lock().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn exists(&self) -> bool {
        self.serialized().is_some()
    }

    fn load(&self) -> Result<CorpusSnapshot, Error> {
        let serialized = self
            .serialized()
            .ok_or_else(|| Error::Custom("no snapshot in memory".to_string()))?;
        serde_json::from_str(&serialized).map_err(|e| Error::CorruptSnapshot {
            path: PathBuf::from("<memory>"),
            reason: e.to_string(),
        })
    }

    fn lock(&self) -> Result<WriteGuard<'_>, Error> {
        Ok(WriteGuard {
            _local: try_local(&self.write_lock, Path::new("<memory>"))?,
            _file: None,
        })
    }

    fn write(&self, snapshot: &CorpusSnapshot, _guard: &WriteGuard<'_>) -> Result<(), Error> {
        let serialized = serde_json::to_string(snapshot)?;
        let mut current = self
            .serialized
            .lock()
            .map_err(|_| Error::Custom("snapshot lock poisoned".to_string()))?;
        *current = Some(serialized);
        Ok(())
    }
}
