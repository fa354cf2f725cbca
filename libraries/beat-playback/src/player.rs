//! Player - store and sink wired together
//!
//! The store only flips flags; this is the presentation-side glue that turns
//! those transitions into sink calls, shared by every front end.

use beat_core::Track;
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::SinkEvent;
use crate::sink::AudioSink;
use crate::store::PlaybackStore;
use crate::types::{PlaybackState, RepeatMode};
use crate::volume::clamp_volume;

/// Playback store plus the single audio sink it drives
pub struct Player {
    store: PlaybackStore,
    sink: AudioSink,
}

impl Player {
    /// Take ownership of the store and the process's audio sink
    pub fn new(store: PlaybackStore, mut sink: AudioSink) -> Self {
        sink.set_volume(store.state().volume);
        Self { store, sink }
    }

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PlaybackStore {
        &mut self.store
    }

    pub fn sink(&self) -> &AudioSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut AudioSink {
        &mut self.sink
    }

    /// Play `track`, optionally replacing the queue
    ///
    /// On a transport failure `is_loading` is cleared and the error returned;
    /// `is_playing` stays set so the UI can show the stall.
    pub async fn play_track(&mut self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        self.store.play_track(track, queue);
        self.load_current().await
    }

    /// Advance and load the next track
    pub async fn next(&mut self) -> Result<Option<Track>> {
        let Some(track) = self.store.next_track().await else {
            return Ok(None);
        };
        self.load_current().await?;
        Ok(Some(track))
    }

    /// Step back and load the previous track
    pub async fn previous(&mut self) -> Result<Option<Track>> {
        let Some(track) = self.store.previous_track() else {
            return Ok(None);
        };
        self.load_current().await?;
        Ok(Some(track))
    }

    /// Flip play/pause and mirror it on the sink
    ///
    /// Does nothing while no track is selected.
    pub async fn toggle_play(&mut self) -> Result<()> {
        if self.store.state().current_track.is_none() {
            debug!("Nothing selected, ignoring play/pause");
            return Ok(());
        }
        self.store.toggle_play();

        if self.store.state().is_playing {
            if self.sink.source().is_none() {
                return self.load_current().await;
            }
            self.sink.resume().await
        } else {
            self.sink.pause();
            Ok(())
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.store.set_volume(volume);
        self.sink.set_volume(volume);
    }

    pub fn seek(&mut self, seconds: f64) {
        self.sink.seek(seconds);
    }

    /// Hide the player and silence the sink
    pub fn close(&mut self) {
        self.store.close_player();
        self.sink.stop();
    }

    /// Feed a backend event through the sink to subscribers and the store
    ///
    /// A finished track loops under `RepeatMode::One`, otherwise the queue
    /// advances.
    pub async fn handle_event(&mut self, event: SinkEvent) -> Result<()> {
        self.sink.dispatch(event.clone());
        self.store.on_sink_event(&event);

        if event != SinkEvent::Ended {
            return Ok(());
        }

        if self.store.state().repeat == RepeatMode::One && self.sink.source().is_some() {
            debug!("Repeating current track");
            self.sink.seek(0.0);
            return self.sink.resume().await;
        }

        if self.next().await?.is_none() {
            self.store.pause();
        }
        Ok(())
    }

    async fn load_current(&mut self) -> Result<()> {
        let Some(url) = self
            .store
            .state()
            .current_track
            .as_ref()
            .map(|t| t.preview_url.clone())
        else {
            return Ok(());
        };

        self.store.set_is_loading(true);
        let result = self.sink.play(&url).await;
        self.store.set_is_loading(false);

        if let Err(e) = &result {
            warn!(url = %url, error = %e, "Could not start track");
        }
        result
    }
}
