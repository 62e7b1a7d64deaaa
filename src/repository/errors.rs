use thiserror::Error;

use crate::storage::StorageError;

/// Result type returned by repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised while reading or writing persisted records.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Storage(#[from] StorageError),
    /// A persisted record could not be encoded or decoded as JSON.
    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
}
