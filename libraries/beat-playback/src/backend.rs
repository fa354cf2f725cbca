//! Platform-agnostic audio backend trait
//!
//! Abstracts the one underlying audio output handle (a media element, a
//! native player, a headless stub) so the sink works on every platform.

use crate::error::Result;
use async_trait::async_trait;

/// Platform audio output handle
///
/// Exactly one instance exists per process, owned by
/// [`AudioSink`](crate::AudioSink). Nothing else may hold or mutate it.
#[async_trait]
pub trait AudioBackend: Send {
    /// Point the output at a new source URL and begin loading it
    ///
    /// # Returns
    /// * `Ok(())` - Source accepted
    /// * `Err(_)` - URL rejected outright
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start (or continue) audible playback of the loaded source
    ///
    /// Resolves once audio is flowing. Fails on decode/network errors or
    /// when the platform blocks playback (autoplay policy).
    async fn start(&mut self) -> Result<()>;

    /// Stop audible output, keeping the position
    fn pause(&mut self);

    /// Jump to `seconds` from the start of the source
    fn set_position(&mut self, seconds: f64);

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Source duration in seconds (0 while unknown)
    fn duration(&self) -> f64;

    /// Apply a gain already clamped to `[0, 1]`
    fn set_volume(&mut self, volume: f32);

    /// Drop the loaded source
    fn clear(&mut self);
}
