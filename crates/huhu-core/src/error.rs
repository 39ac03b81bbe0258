use crate::joke::JokeId;
use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid joke id: {0}")]
    InvalidJokeId(String),
}

/// Errors surfaced by a [`crate::Repository`].
///
/// `NotFound` and `Empty` are derived from empty result sets or zero
/// affected rows. Every other variant is a failure of the storage engine
/// itself and carries its message for server-side logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("joke not found: {0}")]
    NotFound(JokeId),
    #[error("no jokes available")]
    Empty,
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}
