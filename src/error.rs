//! Error enum
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Http(reqwest::Error),
    Url(url::ParseError),
    /// A page answered with a non-success status.
    Status {
        url: String,
        status: u16,
    },
    /// A persisted snapshot exists but could not be decoded.
    CorruptSnapshot {
        path: PathBuf,
        reason: String,
    },
    /// Another writer holds the snapshot lock.
    Locked(PathBuf),
    /// Not a `owner/name` repository identifier.
    InvalidIdentifier(String),
    /// A build produced no record, and was not saved.
    EmptyBuild,
    ThreadPool(rayon::ThreadPoolBuildError),
    Custom(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "serialization error: {}", e),
            Error::Http(e) => write!(f, "http error: {}", e),
            Error::Url(e) => write!(f, "invalid url: {}", e),
            Error::Status { url, status } => write!(f, "{} answered with status {}", url, status),
            Error::CorruptSnapshot { path, reason } => {
                write!(f, "snapshot {:?} is unreadable: {}", path, reason)
            }
            Error::Locked(path) => write!(f, "snapshot {:?} is locked by another writer", path),
            Error::InvalidIdentifier(id) => write!(f, "invalid repository identifier {:?}", id),
            Error::EmptyBuild => write!(f, "no record was fetched, keeping the stored snapshot"),
            Error::ThreadPool(e) => write!(f, "could not build thread pool: {}", e),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Http(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(e: tempfile::PersistError) -> Error {
        Error::Io(e.error)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
