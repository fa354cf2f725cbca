//! Beat Player - Playback Management
//!
//! Platform-agnostic playback core for the Beat Player marketplace client.
//!
//! This crate provides:
//! - A single audio sink (at most one source audible, ever)
//! - A playback state store (current track, flags, volume, queue)
//! - Queue advance policy (sequential, shuffle, repeat, trending refill)
//! - Recently-played history (20 entries, newest first, no duplicates)
//! - Persisted preferences (volume, shuffle, repeat, history)
//! - Explicit best-effort vs. revert-on-failure remote sync
//!
//! # Architecture
//!
//! `beat-playback` knows nothing about a concrete platform:
//! - Audio output is an [`AudioBackend`] owned by the [`AudioSink`]
//! - The marketplace and key-value storage are `beat-core` traits
//! - [`PlaybackStore`] never touches audio; [`Player`] wires the two
//!
//! # Example: Store Only
//!
//! ```rust
//! use beat_core::{KeyValueStore, MarketplaceApi, Track, TrackId};
//! use beat_playback::{PlaybackConfig, PlaybackStore, RepeatMode};
//! use std::sync::Arc;
//!
//! # struct Offline;
//! # #[async_trait::async_trait]
//! # impl MarketplaceApi for Offline {
//! #     async fn get_trending(&self, _: usize) -> beat_core::Result<Vec<Track>> { Ok(vec![]) }
//! #     async fn record_play(&self, _: &TrackId) -> beat_core::Result<()> { Ok(()) }
//! # }
//! # struct Nowhere;
//! # impl KeyValueStore for Nowhere {
//! #     fn load(&self, _: &str) -> beat_core::Result<Option<serde_json::Value>> { Ok(None) }
//! #     fn save(&self, _: &str, _: serde_json::Value) -> beat_core::Result<()> { Ok(()) }
//! # }
//! let mut store = PlaybackStore::new(
//!     Arc::new(Offline),
//!     Arc::new(Nowhere),
//!     PlaybackConfig::default(),
//! );
//!
//! let queue = vec![
//!     Track::new(1, "Intro", "https://cdn.example.com/1.mp3"),
//!     Track::new(2, "Hook", "https://cdn.example.com/2.mp3"),
//! ];
//! store.play_track(queue[0].clone(), Some(queue));
//! store.toggle_repeat();
//!
//! assert_eq!(store.state().repeat, RepeatMode::One);
//! assert_eq!(store.previous_track().unwrap().id, TrackId::from(2));
//! ```

mod advance;
mod backend;
mod error;
mod events;
mod history;
mod player;
mod preferences;
mod shuffle;
mod sink;
mod store;
mod sync;
pub mod types;
mod volume;

// Public exports
pub use advance::{plan_next, plan_previous, Advance, NextPlan, QueueContext, RefillRequest};
pub use backend::AudioBackend;
pub use error::{PlaybackError, Result};
pub use events::{SinkEvent, SinkEventKind, SubscriptionId};
pub use history::{RecentlyPlayed, RECENTLY_PLAYED_LIMIT};
pub use player::Player;
pub use preferences::{Preferences, PREFERENCES_KEY};
pub use sink::AudioSink;
pub use store::PlaybackStore;
pub use sync::{spawn_remote, SyncOutcome, SyncPolicy};
pub use types::{PlaybackConfig, PlaybackState, RepeatMode};
pub use volume::clamp_volume;
