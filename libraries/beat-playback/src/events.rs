//! Audio sink events
//!
//! The platform backend reports progress and failures; the sink fans them out
//! to whoever subscribed for that kind of event.

use serde::{Deserialize, Serialize};

/// Events emitted by the audio sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    /// Playback position advanced (drives the seek bar)
    TimeUpdate {
        /// Current position in seconds
        position: f64,
    },

    /// The loaded source played to its end
    Ended,

    /// Loading, decoding or starting the source failed
    Error {
        /// Human-readable cause
        message: String,
    },

    /// Source metadata is available; audio is ready
    LoadedMetadata {
        /// Total duration in seconds
        duration: f64,
    },
}

impl SinkEvent {
    pub fn kind(&self) -> SinkEventKind {
        match self {
            SinkEvent::TimeUpdate { .. } => SinkEventKind::TimeUpdate,
            SinkEvent::Ended => SinkEventKind::Ended,
            SinkEvent::Error { .. } => SinkEventKind::Error,
            SinkEvent::LoadedMetadata { .. } => SinkEventKind::LoadedMetadata,
        }
    }
}

/// Event names a subscriber can register for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SinkEventKind {
    TimeUpdate,
    Ended,
    Error,
    LoadedMetadata,
}

/// Handle returned by [`AudioSink::subscribe`](crate::AudioSink::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
