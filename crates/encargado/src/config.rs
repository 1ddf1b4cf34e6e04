//! Configuration management for encargado.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::DEFAULT_SLOT_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "encargado";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "encargado.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ENCARGADO_`)
/// 2. TOML config file at `~/.config/encargado/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Administrator configuration.
    pub admin: AdminConfig,
    /// Photo preparation configuration.
    pub photos: PhotoConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/encargado/encargado.db`
    pub database_path: Option<PathBuf>,
    /// Slot the application document is stored under.
    pub slot_key: String,
}

/// Administrator-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Minimum length accepted when changing the password.
    pub min_password_length: usize,
}

/// Photo preparation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Longest edge of a stored photo, in pixels.
    pub max_dimension: u32,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            min_password_length: 4,
        }
    }
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_dimension: 800,
            jpeg_quality: 70,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Reads `config_path` when given, the default config file otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ENCARGADO_").split("__"));

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

        if self.admin.min_password_length == 0 {
            return Err(Error::ConfigValidation {
                message: "min_password_length must be greater than 0".to_string(),
            });
        }

        if self.photos.max_dimension == 0 {
            return Err(Error::ConfigValidation {
                message: "max_dimension must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.photos.jpeg_quality) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "jpeg_quality ({}) must be between 1 and 100",
                    self.photos.jpeg_quality
                ),
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
        assert_eq!(config.storage.slot_key, "encargado_app_data");
        assert_eq!(config.admin.min_password_length, 4);
        assert_eq!(config.photos.max_dimension, 800);
        assert_eq!(config.photos.jpeg_quality, 70);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_zero_password_length() {
        let mut config = Config::default();
        config.admin.min_password_length = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_password_length"));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let mut config = Config::default();
        config.photos.max_dimension = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_dimension"));
    }

    #[test]
    fn test_validate_quality_range() {
        let mut config = Config::default();
        config.photos.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.photos.jpeg_quality = 101;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("jpeg_quality"));

        config.photos.jpeg_quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("encargado.db"));
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
        assert!(path.to_string_lossy().contains("encargado"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nslot_key = \"site_a\"\n\n[photos]\njpeg_quality = 85\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.slot_key, "site_a");
        assert_eq!(config.photos.jpeg_quality, 85);
        assert_eq!(config.photos.max_dimension, 800);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[admin]\nmin_password_length = 0\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_reads_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndatabase_path = \"/srv/encargado.db\"\n\n[admin]\nmin_password_length = 6\n\n[photos]\nmax_dimension = 1024\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/srv/encargado.db"));
        assert_eq!(config.admin.min_password_length, 6);
        assert_eq!(config.photos.max_dimension, 1024);
        assert_eq!(config.storage.slot_key, DEFAULT_SLOT_KEY);
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"slot_key": "custom"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.slot_key, "custom");
        assert!(storage.database_path.is_none());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("slot_key"));
        assert!(json.contains("min_password_length"));
        assert!(json.contains("jpeg_quality"));
    }
}
