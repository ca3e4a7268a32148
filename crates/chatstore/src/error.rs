//! Error types for the chat repositories

use std::fmt;

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced by the repository layer
///
/// Translation to user-facing text is the service layer's job; these are
/// returned verbatim.
#[derive(Debug)]
pub enum Error {
    /// No user with the requested id/email/username
    NoSuchUser,

    /// No public message with the requested id
    NoSuchPublicMessage,

    /// No private message with the requested id
    NoSuchPrivateMessage,

    /// Another user already registered this email
    EmailExists,

    /// Another user already registered this username
    UsernameExists,

    /// Underlying store failure
    Store(tabledb::Error),

    /// Row (de)serialization failure
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoSuchUser => write!(f, "No such user"),
            Error::NoSuchPublicMessage => write!(f, "No such public message"),
            Error::NoSuchPrivateMessage => write!(f, "No such private message"),
            Error::EmailExists => write!(f, "User with this email already exists"),
            Error::UsernameExists => write!(f, "User with this username already exists"),
            Error::Store(e) => write!(f, "Store error: {}", e),
            Error::Json(e) => write!(f, "Row encoding error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tabledb::Error> for Error {
    fn from(err: tabledb::Error) -> Self {
        Error::Store(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
