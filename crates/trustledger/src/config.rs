//! Configuration management for trustledger.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. Only the
//! `trustreg` binary reads configuration; the library types take their
//! settings as plain arguments.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "trustledger";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "members.db";

/// Default key of the member snapshot slot.
pub const DEFAULT_SLOT_KEY: &str = "pst_members";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `TRUSTLEDGER_`)
/// 2. TOML config file at `~/.config/trustledger/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Registry configuration.
    pub registry: RegistryConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/trustledger/members.db`
    pub database_path: Option<PathBuf>,
    /// Key the member snapshot is stored under.
    pub slot_key: String,
}

/// Registry behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Start from the built-in seed members when nothing has been saved.
    pub seed_on_empty: bool,
    /// How many random ids to try before giving up on a registration.
    pub id_attempts: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_on_empty: true,
            id_attempts: 50,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `TRUSTLEDGER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("TRUSTLEDGER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "slot_key must not be empty".to_string(),
            });
        }

        if self.registry.id_attempts == 0 {
            return Err(Error::ConfigValidation {
                message: "id_attempts must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "pst_members");
        assert!(config.registry.seed_on_empty);
        assert_eq!(config.registry.id_attempts, 50);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_zero_id_attempts() {
        let mut config = Config::default();
        config.registry.id_attempts = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("id_attempts"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("trustledger"));
        assert!(path.to_string_lossy().ends_with("members.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("trustledger"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Missing file falls back to defaults
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("trustledger-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nslot_key = \"test_members\"\n\n[registry]\nseed_on_empty = false\nid_attempts = 5\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();

        assert_eq!(config.storage.slot_key, "test_members");
        assert!(!config.registry.seed_on_empty);
        assert_eq!(config.registry.id_attempts, 5);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = std::env::temp_dir().join(format!("trustledger-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[registry]\nid_attempts = 0\n").unwrap();

        let result = Config::load_from(Some(path));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"slot_key": "other"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.slot_key, "other");
        assert!(storage.database_path.is_none());
    }

    #[test]
    fn test_registry_config_serialize() {
        let json = serde_json::to_string(&RegistryConfig::default()).unwrap();
        assert!(json.contains("seed_on_empty"));
        assert!(json.contains("id_attempts"));
    }
}
