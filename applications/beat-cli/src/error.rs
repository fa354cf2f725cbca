/// CLI error types
use beat_market_client::MarketClientError;
use beat_playback::PlaybackError;
use beat_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Marketplace error: {0}")]
    Market(#[from] MarketClientError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Track not found in trending: {0}")]
    UnknownTrack(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
