//! Marketplace API client.

use crate::error::{MarketClientError, Result};
use crate::types::{MarketConfig, TrendingResponse};
use async_trait::async_trait;
use beat_core::{MarketplaceApi, Track, TrackId};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the beat marketplace HTTP API.
///
/// Only the two endpoints the playback core needs are covered: the trending
/// feed used for queue refills and the play counter.
///
/// # Example
///
/// ```ignore
/// use beat_market_client::{MarketClient, MarketConfig};
///
/// let client = MarketClient::new(MarketConfig::new("https://api.beats.example.com"))?;
/// let trending = client.get_trending(20).await?;
/// client.record_play(&trending[0].id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MarketClient {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl MarketClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MarketConfig) -> Result<Self> {
        let raw = config.base_url.trim();
        if raw.is_empty() {
            return Err(MarketClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| MarketClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(MarketClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("BeatPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token.filter(|t| !t.is_empty()),
        })
    }

    /// Base URL without trailing slash.
    pub fn url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Fetch up to `limit` trending tracks.
    pub async fn get_trending(&self, limit: usize) -> Result<Vec<Track>> {
        let mut url = self.endpoint(&["tracks", "trending"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        debug!(url = %url, "Fetching trending tracks");

        let response = Self::check(self.send(self.http.get(url)).await?).await?;
        let trending: TrendingResponse = response.json().await.map_err(|e| {
            MarketClientError::ParseError(format!("Failed to parse trending response: {}", e))
        })?;

        info!(count = trending.data.len(), limit, "Fetched trending tracks");
        Ok(trending.data)
    }

    /// Increment the play counter of `track_id`.
    pub async fn record_play(&self, track_id: &TrackId) -> Result<()> {
        let url = self.endpoint(&["tracks", track_id.as_str(), "play"])?;
        debug!(url = %url, track_id = %track_id, "Recording play");

        Self::check(self.send(self.http.post(url)).await?).await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MarketClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                MarketClientError::ServerUnreachable(e.to_string())
            } else {
                MarketClientError::Request(e)
            }
        })
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(MarketClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(MarketClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl MarketplaceApi for MarketClient {
    async fn get_trending(&self, limit: usize) -> beat_core::Result<Vec<Track>> {
        Ok(MarketClient::get_trending(self, limit).await?)
    }

    async fn record_play(&self, track_id: &TrackId) -> beat_core::Result<()> {
        Ok(MarketClient::record_play(self, track_id).await?)
    }
}
