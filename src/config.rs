// Configuration handling for playcontrol
//
// The configuration is a single JSON document with a section per concern:
// logging, which backends to enable, and seed playlists for the demo
// binary.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{SourceType, Track};
use crate::logging::LoggingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-backend configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
}

fn default_enable() -> bool {
    true
}

/// A seed playlist, used by the demo binary to populate the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    pub id: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Top-level configuration document
///
/// # Example
///
/// ```rust
/// use playcontrol::config::Config;
/// use playcontrol::SourceType;
///
/// let json = r#"{ "backends": { "youtube": { "enable": true } } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.enabled_source_types(), vec![SourceType::Youtube]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Backend sections keyed by source type name
    #[serde(default)]
    pub backends: HashMap<String, BackendConfig>,

    #[serde(default)]
    pub playlists: Vec<PlaylistConfig>,
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Source types with an enabled backend section.
    ///
    /// Sections with names that are not a known source type are warned
    /// about and skipped.
    pub fn enabled_source_types(&self) -> Vec<SourceType> {
        let mut enabled: Vec<SourceType> = self
            .backends
            .iter()
            .filter(|(_, section)| section.enable)
            .filter_map(|(name, _)| match SourceType::from_str(name) {
                Ok(source_type) => Some(source_type),
                Err(_) => {
                    warn!("unknown backend section '{}' in config, skipping", name);
                    None
                }
            })
            .collect();
        enabled.sort_by_key(|source_type| source_type.to_string());
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "logging": { "level": "debug", "timestamps": false },
            "backends": {
                "youtube": { "enable": true },
                "soundcloud": { "enable": false },
                "local": {}
            },
            "playlists": [
                {
                    "id": "demo",
                    "tracks": [
                        { "id": "t1", "title": "One", "source_type": "youtube" }
                    ]
                }
            ]
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.timestamps);
        assert_eq!(
            config.enabled_source_types(),
            vec![SourceType::Local, SourceType::Youtube]
        );
        assert_eq!(config.playlists.len(), 1);
        assert_eq!(config.playlists[0].tracks[0].source_type, SourceType::Youtube);
    }

    #[test]
    fn unknown_backend_sections_are_skipped() {
        let json = r#"{ "backends": { "cassette": { "enable": true } } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.enabled_source_types().is_empty());
    }

    #[test]
    fn loads_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "backends": {{ "local": {{}} }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.enabled_source_types(), vec![SourceType::Local]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Config::load("/nonexistent/playcontrol.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
