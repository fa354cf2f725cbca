/// CLI configuration
use crate::error::{CliError, Result};
use beat_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "beat.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_state")]
    pub state: StateSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateSettings {
    /// JSON file holding persisted preferences
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `beat.toml`; a missing default file is fine, a
    /// missing explicit one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with BEAT_)
        settings = settings.add_source(
            config::Environment::with_prefix("BEAT")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            return Err(CliError::Config(
                "API URL is required (set BEAT_API_URL)".to_string(),
            ));
        }

        if self.state.path.as_os_str().is_empty() {
            return Err(CliError::Config(
                "State file path is required (set BEAT_STATE_PATH)".to_string(),
            ));
        }

        if self.playback.refill_batch_size == 0 {
            return Err(CliError::Config(
                "playback.refill_batch_size must be at least 1".to_string(),
            ));
        }

        if self.playback.load_timeout_ms == 0 {
            return Err(CliError::Config(
                "playback.load_timeout_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_api_url(),
        token: None,
    }
}

fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_state() -> StateSettings {
    StateSettings {
        path: default_state_path(),
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./data/beat-player.json")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            state: default_state(),
            playback: PlaybackConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playback.refill_batch_size, 20);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beat.toml");
        fs::write(
            &path,
            r#"
[api]
url = "https://api.beats.example.com"

[state]
path = "/tmp/beat-state.json"

[playback]
refill_batch_size = 10
"#,
        )
        .unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();

        assert_eq!(config.api.url, "https://api.beats.example.com");
        assert!(config.api.token.is_none());
        assert_eq!(config.state.path, PathBuf::from("/tmp/beat-state.json"));
        assert_eq!(config.playback.refill_batch_size, 10);
        assert_eq!(config.playback.load_timeout_ms, 15_000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = CliConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn validation_rejects_empty_url() {
        let mut config = CliConfig::default();
        config.api.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_batch() {
        let mut config = CliConfig::default();
        config.playback.refill_batch_size = 0;
        assert!(config.validate().is_err());
    }
}
