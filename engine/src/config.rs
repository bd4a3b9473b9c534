//! Configuration types for the map marker fix

use crate::core::Identifier;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "MAPFIX_CONFIG";

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime switches for the marker fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFixConfig {
    /// Master switch; when off every hook passes data through untouched
    pub enabled: bool,
    /// Registry identifier of the real player marker kind
    pub player_kind: Identifier,
    /// Half-size of the marker square used for synthesized edge markers
    pub map_extent: i8,
    /// Add a player marker at the map edge when the game produced none
    pub synthesize_missing_player: bool,
    /// Report the player as in bounds while a player marker query runs
    pub force_player_in_bounds: bool,
}

impl Default for MapFixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            player_kind: Identifier::builtin("player"),
            map_extent: 127,
            synthesize_missing_player: true,
            force_player_in_bounds: true,
        }
    }
}

impl MapFixConfig {
    /// Parse and validate a config from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = ?path, "Loading map fix config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load the file named by `MAPFIX_CONFIG`, falling back to defaults
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_extent <= 0 {
            return Err(ConfigError::Invalid(format!(
                "map_extent must be in 1..=127, got {}",
                self.map_extent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MapFixConfig::default();
        assert!(config.enabled);
        assert_eq!(config.player_kind.to_string(), "minecraft:player");
        assert_eq!(config.map_extent, 127);
        assert!(config.synthesize_missing_player);
        assert!(config.force_player_in_bounds);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MapFixConfig::from_json_str(r#"{"synthesize_missing_player": false}"#).unwrap();
        assert!(!config.synthesize_missing_player);
        assert!(config.enabled);
        assert_eq!(config.map_extent, 127);
    }

    #[test]
    fn test_custom_player_kind() {
        let config = MapFixConfig::from_json_str(r#"{"player_kind": "mymod:player"}"#).unwrap();
        assert_eq!(config.player_kind.namespace(), "mymod");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            MapFixConfig::from_json_str(r#"{"map_extent": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            MapFixConfig::from_json_str(r#"{"map_extent": 300}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            MapFixConfig::from_json_str(r#"{"player_kind": "Not Valid"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"enabled": false, "map_extent": 64}}"#).unwrap();

        let config = MapFixConfig::load_from_file(file.path()).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.map_extent, 64);
    }

    #[test]
    fn test_missing_file() {
        let result = MapFixConfig::load_from_file("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
