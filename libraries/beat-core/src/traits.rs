/// Collaborator traits for Beat Player
use crate::error::Result;
use crate::types::{Track, TrackId};
use async_trait::async_trait;

/// Remote marketplace catalogue
///
/// The playback core only needs two calls: a trending batch for queue refill,
/// and a play counter that is advisory telemetry.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Fetch up to `limit` trending tracks
    ///
    /// # Errors
    /// Returns an error if the marketplace is unreachable or rejects the request.
    /// Callers treat any failure as "no tracks available".
    async fn get_trending(&self, limit: usize) -> Result<Vec<Track>>;

    /// Record that a track started playing
    ///
    /// # Errors
    /// Returns an error if the marketplace could not record the play.
    async fn record_play(&self, track_id: &TrackId) -> Result<()>;
}

/// Durable key-value storage for small JSON documents
///
/// Values must survive a process restart.
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`
    ///
    /// Returns `Ok(None)` when nothing is stored.
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: serde_json::Value) -> Result<()>;
}
