//! Error types for tabledb

use std::fmt;
use std::io;

/// Result type alias for tabledb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for store operations
#[derive(Debug)]
pub enum Error {
    /// I/O error on the snapshot path
    Io(io::Error),

    /// Snapshot (de)serialization error
    Json(serde_json::Error),

    /// Table does not exist
    NoSuchTable(String),

    /// Row does not exist
    NoSuchRow(String),

    /// Row identifier already present in the table
    DuplicateKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::NoSuchTable(name) => write!(f, "No such table: {}", name),
            Error::NoSuchRow(id) => write!(f, "No such row: {}", id),
            Error::DuplicateKey(id) => write!(f, "Key already exists: {}", id),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
