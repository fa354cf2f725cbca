//! Error types for the marketplace client.

use beat_core::BeatError;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace API.
#[derive(Error, Debug)]
pub enum MarketClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Endpoint needs a token and none (or an expired one) was sent
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// API is offline or unreachable
    #[error("API unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for marketplace client operations.
pub type Result<T> = std::result::Result<T, MarketClientError>;

impl From<MarketClientError> for BeatError {
    fn from(err: MarketClientError) -> Self {
        BeatError::network(err.to_string())
    }
}
