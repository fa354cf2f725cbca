/// ID types for Beat Player entities
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Track identifier
///
/// The marketplace hands out ids as JSON numbers in some payloads and as
/// strings in others. Both are folded into one canonical string at the
/// boundary, so `42` and `"42"` name the same track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for TrackId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

struct TrackIdVisitor;

impl<'de> Visitor<'de> for TrackIdVisitor {
    type Value = TrackId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a track id as a string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TrackId, E> {
        Ok(TrackId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TrackId, E> {
        Ok(TrackId::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TrackId, E> {
        Ok(TrackId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TrackId, E> {
        Ok(TrackId::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TrackId, E> {
        // Integral floats ("7.0") come from loosely typed producers
        if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.007_199_254_740_992e15 {
            Ok(TrackId::from(v as i64))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TrackIdVisitor)
    }
}
