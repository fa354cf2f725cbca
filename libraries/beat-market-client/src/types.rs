//! Types for marketplace API requests and responses.

use beat_core::Track;
use serde::Deserialize;

/// Configuration for connecting to the marketplace API.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Base URL of the API (e.g., "https://api.beats.example.com/v1")
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub access_token: Option<String>,
}

impl MarketConfig {
    /// Anonymous access to `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
        }
    }

    /// Authenticated access to `base_url`.
    pub fn with_token(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Envelope returned by `GET /tracks/trending`.
#[derive(Debug, Deserialize)]
pub struct TrendingResponse {
    pub data: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_envelope_accepts_mixed_ids() {
        let body = r#"{
            "data": [
                { "id": 7, "title": "Dusk", "previewUrl": "https://cdn/7.mp3", "bpm": 140 },
                { "id": "b-12", "title": "Haze", "preview_url": "https://cdn/12.mp3",
                  "producer": { "id": 3, "username": "kairo" } }
            ],
            "total": 2
        }"#;

        let response: TrendingResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].id.as_str(), "7");
        assert_eq!(response.data[1].producer_name(), Some("kairo"));
    }
}
