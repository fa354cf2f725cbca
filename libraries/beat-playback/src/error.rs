//! Error types for playback management

use std::time::Duration;
use thiserror::Error;

/// Playback errors
///
/// Only transport failures surface as errors. Remote marketplace failures are
/// absorbed by the store, and policy dead-ends (empty queue, nothing playing)
/// are plain no-ops.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio backend failed to load, decode or start a source
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// The backend never reported that playback started
    #[error("Audio did not start within {0:?}")]
    LoadTimeout(Duration),

    /// Collaborator error (storage, network)
    #[error(transparent)]
    Core(#[from] beat_core::BeatError),
}

impl PlaybackError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
