/// Core error types for Beat Player
use thiserror::Error;

/// Result type alias using `BeatError`
pub type Result<T> = std::result::Result<T, BeatError>;

/// Core error type for Beat Player
#[derive(Error, Debug)]
pub enum BeatError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote marketplace errors (unreachable, rejected, malformed)
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl BeatError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
