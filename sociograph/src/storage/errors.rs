//! Error types for storage operations.

use crate::models::UserId;

/// Error type for edge storage operations.
///
/// `Conflict` is the typed surface of the uniqueness constraint over
/// the ordered pair; callers branch on it instead of catching a
/// backend-specific duplicate-key exception.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// An edge for the ordered pair already exists.
    #[error("edge {from} -> {to} already exists")]
    Conflict { from: UserId, to: UserId },

    /// No edge for the ordered pair, or it is no longer in the
    /// state the operation required.
    #[error("no edge {from} -> {to} in the requested state")]
    NotFound { from: UserId, to: UserId },

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
