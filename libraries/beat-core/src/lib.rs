//! Beat Player Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling
//! shared by the playback core, its storage backends and the marketplace client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `ProducerRef`
//! - **Collaborator Traits**: `MarketplaceApi` (remote catalogue) and
//!   `KeyValueStore` (durable preference storage)
//! - **Error Handling**: Unified `BeatError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use beat_core::{Track, TrackId};
//!
//! let track = Track::new(42, "Night Drive", "https://cdn.example.com/42.mp3");
//!
//! // Numeric and string identifiers share one canonical form
//! assert_eq!(track.id, TrackId::from("42"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{BeatError, Result};
pub use traits::{KeyValueStore, MarketplaceApi};
pub use types::{ProducerRef, Track, TrackId};
