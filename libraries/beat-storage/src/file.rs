//! JSON file key-value store
//!
//! All keys live in one JSON object. Every save rewrites the whole file via a
//! temporary sibling and a rename, so a crash mid-write leaves the previous
//! version intact.

use beat_core::KeyValueStore;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, StorageError};

/// File-backed store that survives process restarts
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// A missing file is an empty store; parent directories are created on
    /// the first save.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&content)? {
                    Value::Object(map) => map,
                    other => {
                        return Err(StorageError::Corrupt {
                            path: path.display().to_string(),
                            reason: format!("expected a JSON object, found {}", kind(&other)),
                        })
                    }
                }
            }
        } else {
            Map::new()
        };

        info!(path = %path.display(), keys = entries.len(), "Opened preference store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), keys = entries.len(), "Saved preference store");
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> beat_core::Result<Option<Value>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: Value) -> beat_core::Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        // Memory only changes once the file does
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.write(&next)?;
        *entries = next;
        Ok(())
    }
}
