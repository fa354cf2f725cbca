//! Persisted preference slice
//!
//! Volume, shuffle, repeat and the recently-played list survive restarts.
//! The current track, play flag, loading flag and queue never do, so a
//! relaunch cannot resume audio nobody asked for.

use beat_core::{KeyValueStore, Track};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::history::RecentlyPlayed;
use crate::types::{PlaybackState, RepeatMode};
use crate::volume::clamp_volume;

/// Storage key for the preference document
pub const PREFERENCES_KEY: &str = "beat-player.playback";

/// The four persisted fields, stored as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub volume: f32,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub recently_played: RecentlyPlayed,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
            recently_played: RecentlyPlayed::default(),
        }
    }
}

impl Preferences {
    /// Capture the persisted slice of a state
    pub fn from_state(state: &PlaybackState) -> Self {
        Self {
            volume: state.volume,
            shuffle: state.shuffle,
            repeat: state.repeat,
            recently_played: state.recently_played.clone(),
        }
    }

    /// Fresh state seeded with these preferences
    pub fn into_state(self) -> PlaybackState {
        PlaybackState {
            volume: clamp_volume(self.volume),
            shuffle: self.shuffle,
            repeat: self.repeat,
            recently_played: self.recently_played,
            ..PlaybackState::default()
        }
    }

    /// Load from `store`, falling back to defaults
    ///
    /// A missing key or a storage failure yields defaults. Otherwise each
    /// field is read on its own, so one malformed field only resets itself.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let value = match store.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "No saved preferences, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read preferences, using defaults");
                return Self::default();
            }
        };

        let Value::Object(fields) = value else {
            warn!(key, "Saved preferences are not an object, using defaults");
            return Self::default();
        };

        let defaults = Self::default();
        Self {
            volume: field(&fields, "volume").map_or(defaults.volume, clamp_volume),
            shuffle: field(&fields, "shuffle").unwrap_or(defaults.shuffle),
            repeat: field(&fields, "repeat").unwrap_or(defaults.repeat),
            recently_played: history(&fields),
        }
    }

    /// Write the full document to `store`
    pub fn save(&self, store: &dyn KeyValueStore, key: &str) -> beat_core::Result<()> {
        store.save(key, serde_json::to_value(self)?)
    }
}

fn field<T: DeserializeOwned>(fields: &Map<String, Value>, name: &str) -> Option<T> {
    let value = fields.get(name)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(field = name, error = %e, "Ignoring malformed preference");
            None
        }
    }
}

/// Rebuild the history from the entries that still parse as tracks
fn history(fields: &Map<String, Value>) -> RecentlyPlayed {
    let entries = match fields.get("recentlyPlayed") {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            warn!("Ignoring malformed recently played list");
            return RecentlyPlayed::default();
        }
        None => return RecentlyPlayed::default(),
    };

    let tracks: Vec<Track> = entries
        .iter()
        .filter_map(|entry| match Track::deserialize(entry) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable recently played entry");
                None
            }
        })
        .collect();
    RecentlyPlayed::from(tracks)
}
