//! Wiring of the playback core for the command line
//!
//! One [`App`] per process: marketplace client, preference file, headless
//! audio sink and the player that ties them together.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::headless::HeadlessBackend;
use beat_core::{MarketplaceApi, Track, TrackId};
use beat_market_client::{MarketClient, MarketConfig};
use beat_playback::{
    AudioSink, PlaybackState, PlaybackStore, Player, Preferences, RepeatMode, SinkEvent,
    SyncOutcome,
};
use beat_storage::JsonFileStore;
use std::sync::Arc;
use tracing::{debug, info};

pub struct App {
    market: Arc<MarketClient>,
    player: Player,
    batch_size: usize,
}

impl App {
    /// Build the player from configuration, restoring saved preferences
    pub fn open(config: &CliConfig) -> Result<Self> {
        let market_config = MarketConfig {
            base_url: config.api.url.clone(),
            access_token: config.api.token.clone(),
        };
        let market = Arc::new(MarketClient::new(market_config)?);
        let prefs = Arc::new(JsonFileStore::open(&config.state.path)?);

        let store = PlaybackStore::new(
            Arc::clone(&market) as Arc<dyn MarketplaceApi>,
            prefs,
            config.playback.clone(),
        );
        let sink = AudioSink::new(
            Box::new(HeadlessBackend::new()),
            config.playback.load_timeout(),
        );

        info!(api = %market.url(), state = %config.state.path.display(), "Player ready");

        Ok(Self {
            market,
            player: Player::new(store, sink),
            batch_size: config.playback.refill_batch_size,
        })
    }

    pub fn state(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    // ===== Marketplace =====

    pub async fn trending(&self, limit: usize) -> Result<Vec<Track>> {
        Ok(self.market.get_trending(limit).await?)
    }

    /// Play `id` with the trending batch it was found in as the queue
    pub async fn play(&mut self, id: &TrackId) -> Result<Track> {
        let batch = self.trending(self.batch_size).await?;
        let track = batch
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| CliError::UnknownTrack(id.to_string()))?;

        debug!(track_id = %id, queue = batch.len(), "Starting from trending batch");
        self.player.play_track(track.clone(), Some(batch)).await?;
        Ok(track)
    }

    // ===== Transport =====

    pub async fn next(&mut self) -> Result<Option<Track>> {
        Ok(self.player.next().await?)
    }

    pub async fn previous(&mut self) -> Result<Option<Track>> {
        Ok(self.player.previous().await?)
    }

    /// Flip play/pause; returns whether audio is now playing
    pub async fn toggle_play(&mut self) -> Result<bool> {
        self.player.toggle_play().await?;
        Ok(self.player.state().is_playing)
    }

    pub fn seek(&mut self, seconds: f64) -> f64 {
        self.player.seek(seconds);
        self.player.sink().current_time()
    }

    /// Behave as if the current track played to its end
    pub async fn finish_track(&mut self) -> Result<()> {
        Ok(self.player.handle_event(SinkEvent::Ended).await?)
    }

    pub fn stop(&mut self) {
        self.player.close();
    }

    // ===== Preferences =====

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.player.set_volume(volume);
        self.player.state().volume
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.player.store_mut().toggle_shuffle();
        self.player.state().shuffle
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.player.store_mut().toggle_repeat();
        self.player.state().repeat
    }

    pub fn recent(&self) -> Vec<Track> {
        self.player.state().recently_played.to_vec()
    }

    pub fn clear_history(&mut self) {
        self.player.store_mut().clear_recently_played();
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::from_state(self.player.state())
    }

    /// Wait for background play recording before the process exits
    pub async fn shutdown(&mut self) -> Vec<SyncOutcome> {
        self.player.store_mut().flush_remote().await
    }
}

/// One-line rendering of a track for terminal output
pub fn describe(track: &Track) -> String {
    let mut line = format!("{:>8}  {}", track.id.as_str(), track.title);
    if let Some(producer) = track.producer_name() {
        line.push_str(&format!(" by {}", producer));
    }
    if let Some(bpm) = track.bpm {
        line.push_str(&format!(" [{} bpm]", bpm));
    }
    line
}
