//! Error types for scryfall_sync

use mtg_common::DecodeError;
use std::fmt;

/// Unified error type for scryfall_sync operations
#[derive(Debug)]
pub enum SyncError {
    /// HTTP request failed (connection refused, TLS, timeout, etc.)
    Network(reqwest::Error),
    /// Any HTTP status other than 200
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },
    /// A paginated listing pointed back at a page already fetched
    PageLoop { url: String },
    /// Response or record could not be decoded
    Decode(DecodeError),
    /// Database operation failed
    Database(rusqlite::Error),
    /// Compound field could not be encoded for storage
    Encode(serde_json::Error),
    /// Stored compound field could not be decoded
    StoredValue {
        column: &'static str,
        source: serde_json::Error,
    },
}

/// Coarse classification callers use to decide between skipping and aborting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Storage,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Network(_) | SyncError::HttpStatus { .. } | SyncError::PageLoop { .. } => {
                ErrorKind::Transport
            }
            SyncError::Decode(_) => ErrorKind::Decode,
            SyncError::Database(_) | SyncError::Encode(_) | SyncError::StoredValue { .. } => {
                ErrorKind::Storage
            }
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(e) => write!(f, "Network error: {}", e),
            SyncError::HttpStatus { status, url } => {
                write!(f, "API request failed with status {} ({})", status, url)
            }
            SyncError::PageLoop { url } => {
                write!(f, "Pagination revisited an already fetched page ({})", url)
            }
            SyncError::Decode(e) => write!(f, "Decode error: {}", e),
            SyncError::Database(e) => write!(f, "Database error: {}", e),
            SyncError::Encode(e) => write!(f, "Encode error: {}", e),
            SyncError::StoredValue { column, source } => {
                write!(f, "Stored value in `{}` is not valid JSON: {}", column, source)
            }
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Network(e) => Some(e),
            SyncError::HttpStatus { .. } | SyncError::PageLoop { .. } => None,
            SyncError::Decode(e) => Some(e),
            SyncError::Database(e) => Some(e),
            SyncError::Encode(e) => Some(e),
            SyncError::StoredValue { source, .. } => Some(source),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err)
    }
}

impl From<DecodeError> for SyncError {
    fn from(err: DecodeError) -> Self {
        SyncError::Decode(err)
    }
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        SyncError::Database(err)
    }
}

/// Crate-level error alias
pub type Error = SyncError;

/// Result alias for scryfall_sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
