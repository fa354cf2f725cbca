/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file holds something other than a JSON object
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Lock poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<StorageError> for beat_core::BeatError {
    fn from(err: StorageError) -> Self {
        beat_core::BeatError::storage(err.to_string())
    }
}
