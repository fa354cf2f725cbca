//! Recently-played history
//!
//! Maintains a bounded, de-duplicated list of played tracks, newest first.

use beat_core::Track;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of tracks kept in history
pub const RECENTLY_PLAYED_LIMIT: usize = 20;

/// Recently-played history with bounded size
///
/// Playing a track that is already present moves it to the front instead of
/// adding a second entry. When full, the oldest entry is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Track>", into = "Vec<Track>")]
pub struct RecentlyPlayed {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl RecentlyPlayed {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Move `track` to the front, inserting it if absent
    pub fn push(&mut self, track: Track) {
        if let Some(pos) = self.tracks.iter().position(|t| t.same_track(&track)) {
            self.tracks.remove(pos);
        }
        self.tracks.push_front(track);
        self.tracks.truncate(self.max_size);
    }

    /// Most recent track
    pub fn latest(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Owned copy, newest first
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(RECENTLY_PLAYED_LIMIT)
    }
}

impl From<Vec<Track>> for RecentlyPlayed {
    /// Rebuilds the invariants from an untrusted list (e.g. a stored document):
    /// keeps the first occurrence of each id and the first 20 entries.
    fn from(tracks: Vec<Track>) -> Self {
        let mut history = Self::default();
        for track in tracks {
            if history.len() == history.max_size {
                break;
            }
            if !history.tracks.iter().any(|t| t.same_track(&track)) {
                history.tracks.push_back(track);
            }
        }
        history
    }
}

impl From<RecentlyPlayed> for Vec<Track> {
    fn from(history: RecentlyPlayed) -> Self {
        history.tracks.into_iter().collect()
    }
}
