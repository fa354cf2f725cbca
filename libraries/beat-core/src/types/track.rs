/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Deserializer, Serialize};

/// Reference to the producer who published a beat
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProducerRef {
    /// Producer identifier, canonicalised like track ids
    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<String>,

    /// Display name
    #[serde(default, alias = "username")]
    pub name: String,
}

fn loose_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<TrackId>::deserialize(deserializer)?.map(|id| id.as_str().to_string()))
}

/// Marketplace track
///
/// Immutable from the playback core's point of view. Two tracks are the
/// same track when their ids match; every other field is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Canonical track identifier
    pub id: TrackId,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Publishing producer
    #[serde(default)]
    pub producer: Option<ProducerRef>,

    /// Preview audio URL handed to the audio sink
    #[serde(default, alias = "preview_url", alias = "audioUrl")]
    pub preview_url: String,

    /// Cover artwork URL
    #[serde(default, alias = "cover_url")]
    pub cover_url: Option<String>,

    /// Tempo in beats per minute
    #[serde(default)]
    pub bpm: Option<u32>,

    /// Musical key (e.g. "A minor")
    #[serde(default)]
    pub key: Option<String>,

    /// Listed price
    #[serde(default)]
    pub price: Option<f64>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            producer: None,
            preview_url: preview_url.into(),
            cover_url: None,
            bpm: None,
            key: None,
            price: None,
        }
    }

    /// Attach a producer reference
    #[must_use]
    pub fn with_producer(mut self, name: impl Into<String>) -> Self {
        self.producer = Some(ProducerRef {
            id: None,
            name: name.into(),
        });
        self
    }

    /// Identity comparison used by the playback core
    pub fn same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }

    /// Producer display name, if known
    pub fn producer_name(&self) -> Option<&str> {
        self.producer.as_ref().map(|p| p.name.as_str())
    }
}
