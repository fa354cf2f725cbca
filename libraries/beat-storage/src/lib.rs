//! Beat Player Storage
//!
//! Durable key-value storage for the small JSON documents the player keeps
//! between runs (playback preferences, recently played).
//!
//! # Backends
//!
//! - [`JsonFileStore`]: one JSON object on disk, rewritten atomically
//! - [`MemoryStore`]: process-local map for tests and throwaway sessions
//!
//! # Example
//!
//! ```rust,no_run
//! use beat_core::KeyValueStore;
//! use beat_storage::JsonFileStore;
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::open("state/beat-player.json")?;
//! store.save("ui.theme", json!("dark"))?;
//!
//! let theme = store.load("ui.theme")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;

pub use error::{Result, StorageError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
