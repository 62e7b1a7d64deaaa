use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Result type returned by key-value store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file does not contain a valid string-to-string map.
    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
    /// The in-process lock guarding the store was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value store with local-storage semantics: string keys map to
/// string values, writes apply synchronously, and the last write wins.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key` and its value. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
