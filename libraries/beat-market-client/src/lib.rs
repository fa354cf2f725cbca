//! Beat Player Marketplace Client
//!
//! HTTP client for the two marketplace endpoints the playback core talks to.
//!
//! # Features
//!
//! - **Trending**: `GET /tracks/trending?limit=N`, used to refill an exhausted queue
//! - **Play counter**: `POST /tracks/{id}/play`, fired in the background on every play
//!
//! [`MarketClient`] implements [`beat_core::MarketplaceApi`], so it can be
//! handed straight to the playback store.
//!
//! # Example
//!
//! ```ignore
//! use beat_market_client::{MarketClient, MarketConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketClient::new(MarketConfig::new("https://api.beats.example.com"))?;
//!
//!     for track in client.get_trending(10).await? {
//!         println!("{} - {}", track.id, track.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::MarketClient;
pub use error::{MarketClientError, Result};
pub use types::{MarketConfig, TrendingResponse};
