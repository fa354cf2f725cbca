//! Core types for playback management

use beat_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::history::RecentlyPlayed;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Continue past the end of the queue (refilling from trending)
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop entire queue
    All,
}

impl RepeatMode {
    /// Next mode in the `off -> one -> all -> off` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }
}

/// Snapshot of everything the presentation layer renders
///
/// Only the store mutates it; readers get a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Track shown in the player bar
    pub current_track: Option<Track>,

    /// Play/pause flag
    pub is_playing: bool,

    /// A play request is in flight and audio is not ready yet
    pub is_loading: bool,

    /// Output volume in `[0, 1]`
    pub volume: f32,

    /// Random pick on advance
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Active playback context (may not contain `current_track`)
    pub queue: Vec<Track>,

    /// Most-recent-first history
    pub recently_played: RecentlyPlayed,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            is_playing: false,
            is_loading: false,
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            queue: Vec::new(),
            recently_played: RecentlyPlayed::default(),
        }
    }
}

/// Configuration for the playback store and audio sink
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Tracks requested from trending when the queue runs out (default: 20)
    pub refill_batch_size: usize,

    /// How long the sink waits for audio to start, in milliseconds (default: 15000)
    pub load_timeout_ms: u64,

    /// Key under which preferences are persisted
    pub preferences_key: String,
}

impl PlaybackConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            refill_batch_size: 20,
            load_timeout_ms: 15_000,
            preferences_key: crate::preferences::PREFERENCES_KEY.to_string(),
        }
    }
}
