//! Single audio sink
//!
//! Owns the process's only audio backend and guarantees that at most one
//! source is ever audible: starting a new source first fully stops the old
//! one, synchronously, before anything new is loaded.

use crate::backend::AudioBackend;
use crate::error::{PlaybackError, Result};
use crate::events::{SinkEvent, SinkEventKind, SubscriptionId};
use crate::volume::clamp_volume;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

type Callback = Box<dyn FnMut(&SinkEvent) + Send>;

/// Transport facade over the single audio backend
pub struct AudioSink {
    backend: Box<dyn AudioBackend>,
    source: Option<String>,
    playing: bool,
    volume: f32,
    load_timeout: Duration,

    subscribers: HashMap<SinkEventKind, Vec<(SubscriptionId, Callback)>>,
    next_subscription: u64,
}

impl AudioSink {
    /// Take ownership of the platform backend
    pub fn new(backend: Box<dyn AudioBackend>, load_timeout: Duration) -> Self {
        Self {
            backend,
            source: None,
            playing: false,
            volume: 1.0,
            load_timeout,
            subscribers: HashMap::new(),
            next_subscription: 0,
        }
    }

    // ===== Transport =====

    /// Stop whatever is playing, then load and start `url`
    ///
    /// Resolves once audio is flowing. Failures are returned and also
    /// dispatched to `Error` subscribers.
    pub async fn play(&mut self, url: &str) -> Result<()> {
        self.stop();

        debug!(url = %url, "Loading source");
        if let Err(e) = self.backend.load(url) {
            self.fail(&e);
            return Err(e);
        }
        self.source = Some(url.to_string());

        self.start().await
    }

    /// Stop audible output, keeping the position
    pub fn pause(&mut self) {
        if self.source.is_none() {
            return;
        }
        self.backend.pause();
        self.playing = false;
    }

    /// Resume from the current position
    ///
    /// No-op when nothing is loaded.
    pub async fn resume(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Ok(());
        }
        self.start().await
    }

    /// Pause, rewind and drop the source
    pub fn stop(&mut self) {
        if self.source.is_some() {
            self.backend.pause();
            self.backend.set_position(0.0);
            self.backend.clear();
        }
        self.source = None;
        self.playing = false;
    }

    /// Jump to `seconds`; negative values rewind to the start
    pub fn seek(&mut self, seconds: f64) {
        if self.source.is_none() {
            return;
        }
        let target = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.backend.set_position(target);
    }

    /// Set output volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.backend.set_volume(self.volume);
    }

    async fn start(&mut self) -> Result<()> {
        let outcome = tokio::time::timeout(self.load_timeout, self.backend.start()).await;

        match outcome {
            Ok(Ok(())) => {
                self.playing = true;
                Ok(())
            }
            Ok(Err(e)) => {
                self.fail(&e);
                Err(e)
            }
            Err(_) => {
                // Never leave a late start audible behind a reported failure
                self.backend.pause();
                let e = PlaybackError::LoadTimeout(self.load_timeout);
                self.fail(&e);
                Err(e)
            }
        }
    }

    fn fail(&mut self, error: &PlaybackError) {
        warn!(source = ?self.source, error = %error, "Playback failed");
        self.dispatch(SinkEvent::Error {
            message: error.to_string(),
        });
    }

    // ===== Queries =====

    /// Current position in seconds, 0 when nothing is loaded
    pub fn current_time(&self) -> f64 {
        if self.source.is_some() {
            self.backend.position()
        } else {
            0.0
        }
    }

    /// Source duration in seconds, 0 when nothing is loaded
    pub fn duration(&self) -> f64 {
        if self.source.is_some() {
            self.backend.duration()
        } else {
            0.0
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// URL of the loaded source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    // ===== Events =====

    /// Register `callback` for one kind of event
    pub fn subscribe<F>(&mut self, kind: SinkEventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&SinkEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription
    ///
    /// Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for callbacks in self.subscribers.values_mut() {
            if let Some(pos) = callbacks.iter().position(|(sub, _)| *sub == id) {
                callbacks.remove(pos);
                return true;
            }
        }
        false
    }

    /// Deliver a backend event to subscribers of its kind
    pub fn dispatch(&mut self, event: SinkEvent) {
        if matches!(event, SinkEvent::Ended | SinkEvent::Error { .. }) {
            self.playing = false;
        }

        if let Some(callbacks) = self.subscribers.get_mut(&event.kind()) {
            for (_, callback) in callbacks.iter_mut() {
                callback(&event);
            }
        }
    }
}
