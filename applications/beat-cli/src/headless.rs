//! Headless audio backend
//!
//! Stands in for a real output device on servers and in terminals without
//! audio. It accepts any http(s) source, "starts" instantly and keeps a
//! position so seeking and resuming behave like a real player.

use async_trait::async_trait;
use beat_playback::{AudioBackend, PlaybackError, Result};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    source: Option<String>,
    playing: bool,
    position: f64,
    volume: f32,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[async_trait]
impl AudioBackend for HeadlessBackend {
    fn load(&mut self, url: &str) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PlaybackError::backend(format!("unsupported source: {:?}", url)));
        }
        debug!(url = %url, "Headless backend loaded source");
        self.source = Some(url.to_string());
        self.position = 0.0;
        Ok(())
    }

    async fn start(&mut self) -> Result<()> {
        let Some(source) = &self.source else {
            return Err(PlaybackError::backend("no source loaded"));
        };
        info!(source = %source, position = self.position, volume = self.volume, "Playing (headless)");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn clear(&mut self) {
        self.source = None;
        self.playing = false;
        self.position = 0.0;
    }
}
