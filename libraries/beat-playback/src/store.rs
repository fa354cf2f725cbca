//! Playback state store - core orchestration
//!
//! Single source of truth for what the player shows. Commands update state
//! optimistically and immediately; remote calls (play recording, trending
//! refill) never roll a change back.
//!
//! The store does not drive audio. Wiring `is_playing` transitions to the
//! sink is the caller's job (see [`Player`](crate::Player)), which keeps the
//! store testable without an audio backend.

use beat_core::{KeyValueStore, MarketplaceApi, Track};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::advance::{self, Advance, NextPlan, QueueContext};
use crate::events::SinkEvent;
use crate::preferences::Preferences;
use crate::sync::{spawn_remote, SyncOutcome, SyncPolicy};
use crate::types::{PlaybackConfig, PlaybackState};
use crate::volume::clamp_volume;

/// Playing a track is advisory telemetry, never worth a visible revert
const RECORD_PLAY_POLICY: SyncPolicy = SyncPolicy::BestEffort;

/// Process-wide playback state
pub struct PlaybackStore {
    state: PlaybackState,
    config: PlaybackConfig,

    api: Arc<dyn MarketplaceApi>,
    preferences: Arc<dyn KeyValueStore>,

    // Detached remote calls not yet awaited
    pending_sync: Vec<JoinHandle<SyncOutcome>>,
}

impl PlaybackStore {
    /// Create the store, restoring persisted preferences
    pub fn new(
        api: Arc<dyn MarketplaceApi>,
        preferences: Arc<dyn KeyValueStore>,
        config: PlaybackConfig,
    ) -> Self {
        let state = Preferences::load(preferences.as_ref(), &config.preferences_key).into_state();

        debug!(
            volume = state.volume,
            shuffle = state.shuffle,
            repeat = state.repeat.as_str(),
            recently_played = state.recently_played.len(),
            "Playback store initialised"
        );

        Self {
            state,
            config,
            api,
            preferences,
            pending_sync: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Track changes =====

    /// Make `track` current and start it
    ///
    /// A non-empty `queue` replaces the active queue. The play is recorded
    /// remotely in the background; a failure there is only logged.
    pub fn play_track(&mut self, track: Track, queue: Option<Vec<Track>>) {
        if let Some(queue) = queue.filter(|q| !q.is_empty()) {
            self.state.queue = queue;
        }

        info!(track_id = %track.id, title = %track.title, "Playing track");
        self.record_play(&track);
        self.make_current(track);
    }

    /// Advance to the next track
    ///
    /// May suspend on a trending refill. Returns the new current track, or
    /// `None` when there was nothing to advance to (state untouched).
    pub async fn next_track(&mut self) -> Option<Track> {
        let plan = advance::plan_next(&self.queue_context(), &mut rand::thread_rng());

        let outcome = match plan {
            NextPlan::Stay => None,
            NextPlan::Pick(track) => Some(Advance {
                track,
                replace_queue: None,
            }),
            NextPlan::Refill(request) => {
                let fetched = self.api.get_trending(self.config.refill_batch_size).await;
                request.resolve(fetched)
            }
        };

        self.apply(outcome)
    }

    /// Step back to the previous track
    pub fn previous_track(&mut self) -> Option<Track> {
        let track = advance::plan_previous(&self.queue_context(), &mut rand::thread_rng());
        self.apply(track.map(|track| Advance {
            track,
            replace_queue: None,
        }))
    }

    fn apply(&mut self, outcome: Option<Advance>) -> Option<Track> {
        let Some(Advance {
            track,
            replace_queue,
        }) = outcome
        else {
            debug!("No track to advance to");
            return None;
        };

        if let Some(queue) = replace_queue {
            self.state.queue = queue;
        }

        debug!(track_id = %track.id, "Advanced");
        self.make_current(track.clone());
        Some(track)
    }

    fn make_current(&mut self, track: Track) {
        self.state.recently_played.push(track.clone());
        self.state.current_track = Some(track);
        self.state.is_playing = true;
        self.persist();
    }

    fn queue_context(&self) -> QueueContext<'_> {
        QueueContext {
            queue: &self.state.queue,
            current: self.state.current_track.as_ref(),
            shuffle: self.state.shuffle,
            repeat: self.state.repeat,
        }
    }

    // ===== Play / pause flags =====

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn resume(&mut self) {
        self.state.is_playing = true;
    }

    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
    }

    pub fn set_is_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
    }

    /// Hide the player; queue and history stay
    pub fn close_player(&mut self) {
        self.state.current_track = None;
        self.state.is_playing = false;
    }

    // ===== Settings =====

    /// Set volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = clamp_volume(volume);
        self.persist();
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        self.persist();
    }

    /// Cycle repeat `off -> one -> all -> off`
    pub fn toggle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycle();
        self.persist();
    }

    // ===== Queue & history =====

    /// Replace the queue without touching the current track
    pub fn set_playlist(&mut self, queue: Vec<Track>) {
        self.state.queue = queue;
    }

    pub fn clear_recently_played(&mut self) {
        self.state.recently_played.clear();
        self.persist();
    }

    // ===== Sink feedback =====

    /// React to an audio sink event
    ///
    /// Audio becoming ready or failing both end the loading phase. On error
    /// `is_playing` is left alone for the presentation layer to reset.
    pub fn on_sink_event(&mut self, event: &SinkEvent) {
        match event {
            SinkEvent::LoadedMetadata { .. } | SinkEvent::Error { .. } => {
                self.state.is_loading = false;
            }
            SinkEvent::TimeUpdate { .. } | SinkEvent::Ended => {}
        }
    }

    // ===== Remote sync =====

    fn record_play(&mut self, track: &Track) {
        self.pending_sync.retain(|handle| !handle.is_finished());

        let api = Arc::clone(&self.api);
        let track_id = track.id.clone();
        if let Some(handle) = spawn_remote("record_play", RECORD_PLAY_POLICY, async move {
            api.record_play(&track_id).await
        }) {
            self.pending_sync.push(handle);
        }
    }

    /// Wait for outstanding background remote calls
    ///
    /// Short-lived front ends call this before exiting so telemetry is not
    /// dropped with the runtime.
    pub async fn flush_remote(&mut self) -> Vec<SyncOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending_sync.len());
        for handle in self.pending_sync.drain(..) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!(error = %e, "Remote sync task did not complete"),
            }
        }
        outcomes
    }

    fn persist(&self) {
        let prefs = Preferences::from_state(&self.state);
        if let Err(e) = prefs.save(self.preferences.as_ref(), &self.config.preferences_key) {
            warn!(error = %e, "Failed to persist playback preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use beat_core::{BeatError, TrackId};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        trending: Mutex<Option<Vec<Track>>>,
        plays: Mutex<Vec<TrackId>>,
    }

    #[async_trait]
    impl MarketplaceApi for FakeApi {
        async fn get_trending(&self, _limit: usize) -> beat_core::Result<Vec<Track>> {
            self.trending
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| BeatError::network("offline"))
        }

        async fn record_play(&self, track_id: &TrackId) -> beat_core::Result<()> {
            self.plays.lock().unwrap().push(track_id.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, serde_json::Value>>);

    impl KeyValueStore for MapStore {
        fn load(&self, key: &str) -> beat_core::Result<Option<serde_json::Value>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        fn save(&self, key: &str, value: serde_json::Value) -> beat_core::Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    fn t(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), format!("https://cdn/{}.mp3", id))
    }

    fn store() -> PlaybackStore {
        PlaybackStore::new(
            Arc::new(FakeApi::default()),
            Arc::new(MapStore::default()),
            PlaybackConfig::default(),
        )
    }

    #[test]
    fn flag_flips_do_not_touch_track() {
        let mut store = store();
        store.play_track(t("A"), None);

        store.pause();
        assert!(!store.state().is_playing);
        store.resume();
        assert!(store.state().is_playing);
        store.toggle_play();
        assert!(!store.state().is_playing);
        assert_eq!(store.state().current_track.as_ref().unwrap().id.as_str(), "A");
    }

    #[test]
    fn play_without_queue_keeps_existing_queue() {
        let mut store = store();
        store.set_playlist(vec![t("A"), t("B")]);

        store.play_track(t("Z"), None);
        assert_eq!(store.state().queue.len(), 2);

        store.play_track(t("Y"), Some(Vec::new()));
        assert_eq!(store.state().queue.len(), 2);

        store.play_track(t("C"), Some(vec![t("C"), t("D"), t("E")]));
        assert_eq!(store.state().queue.len(), 3);
    }

    #[test]
    fn close_player_keeps_queue_and_history() {
        let mut store = store();
        store.play_track(t("A"), Some(vec![t("A"), t("B")]));
        store.close_player();

        assert!(store.state().current_track.is_none());
        assert!(!store.state().is_playing);
        assert_eq!(store.state().queue.len(), 2);
        assert_eq!(store.state().recently_played.len(), 1);
    }

    #[test]
    fn loading_cleared_by_sink_feedback() {
        let mut store = store();
        store.set_is_loading(true);
        store.on_sink_event(&SinkEvent::TimeUpdate { position: 1.0 });
        assert!(store.state().is_loading);

        store.on_sink_event(&SinkEvent::Error {
            message: "decode".into(),
        });
        assert!(!store.state().is_loading);

        store.set_is_loading(true);
        store.on_sink_event(&SinkEvent::LoadedMetadata { duration: 60.0 });
        assert!(!store.state().is_loading);
    }

    #[test]
    fn play_outside_runtime_still_updates_state() {
        let mut store = store();
        store.play_track(t("A"), None);
        assert!(store.state().is_playing);
        assert!(store.pending_sync.is_empty());
    }

    #[tokio::test]
    async fn play_is_recorded_in_background() {
        let api = Arc::new(FakeApi::default());
        let mut store = PlaybackStore::new(
            Arc::clone(&api) as Arc<dyn MarketplaceApi>,
            Arc::new(MapStore::default()),
            PlaybackConfig::default(),
        );

        store.play_track(t("A"), None);
        store.play_track(t("B"), None);
        let outcomes = store.flush_remote().await;

        assert_eq!(outcomes, vec![SyncOutcome::Committed, SyncOutcome::Committed]);
        let plays = api.plays.lock().unwrap();
        assert_eq!(plays.as_slice(), [TrackId::from("A"), TrackId::from("B")]);
    }

    #[tokio::test]
    async fn next_with_nothing_is_noop() {
        let mut store = store();
        assert!(store.next_track().await.is_none());
        assert!(store.previous_track().is_none());
        assert!(!store.state().is_playing);
        assert!(store.state().recently_played.is_empty());
    }
}
