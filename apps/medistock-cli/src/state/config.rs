//! # Application Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (--snapshot, --page-size)        (highest priority)   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     MEDISTOCK_SNAPSHOT_PATH=/data/inventory.json                       │
//! │     MEDISTOCK_PAGE_SIZE=25                                             │
//! │     MEDISTOCK_MAX_PAGE_SIZE=1000                                       │
//! │     MEDISTOCK_LOG=debug                                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/medistock/medistock.toml (Linux)                         │
//! │     ~/Library/Application Support/com.medistock.medistock/... (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # medistock.toml
//! [snapshot]
//! path = "/data/inventory.json"
//!
//! [listing]
//! default_page_size = 10
//! max_page_size = 1000
//!
//! [logging]
//! filter = "info,medistock=debug"
//! ```
//!
//! The near-expiry window, markup and cost digit limit are business policy
//! and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Default log filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,medistock=debug";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "medistock.toml";

// =============================================================================
// Snapshot Settings
// =============================================================================

/// Where the inventory snapshot lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSettings {
    /// JSON file exported from the inventory backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Listing Settings
// =============================================================================

/// Paging defaults for the inventory table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSettings {
    /// Page size when the caller does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// Largest page size a caller may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    1000
}

impl Default for ListingSettings {
    fn default() -> Self {
        ListingSettings {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins over this.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub snapshot: SnapshotSettings,

    #[serde(default)]
    pub listing: ListingSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Override with config file (if exists)
    /// 3. Override with environment variables
    /// 4. Validate final configuration
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads the TOML file, or defaults when there is none.
    pub fn from_file(config_path: Option<PathBuf>) -> AppResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file, returning the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| AppError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.listing.max_page_size < 1 {
            return Err(AppError::InvalidConfig(format!(
                "max_page_size must be at least 1, got {}",
                self.listing.max_page_size
            )));
        }

        if self.listing.default_page_size < 1
            || self.listing.default_page_size > self.listing.max_page_size
        {
            return Err(AppError::InvalidConfig(format!(
                "default_page_size must be between 1 and {}, got {}",
                self.listing.max_page_size, self.listing.default_page_size
            )));
        }

        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            AppError::InvalidConfig(format!(
                "Invalid log filter '{}': {}",
                self.logging.filter, e
            ))
        })?;

        Ok(())
    }

    /// Applies `MEDISTOCK_*` environment overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparsable numbers are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("MEDISTOCK_SNAPSHOT_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.snapshot.path = Some(PathBuf::from(path));
        }

        if let Some(size) = lookup("MEDISTOCK_PAGE_SIZE") {
            match size.parse::<i64>() {
                Ok(n) => self.listing.default_page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid MEDISTOCK_PAGE_SIZE"),
            }
        }

        if let Some(size) = lookup("MEDISTOCK_MAX_PAGE_SIZE") {
            match size.parse::<i64>() {
                Ok(n) => self.listing.max_page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid MEDISTOCK_MAX_PAGE_SIZE"),
            }
        }

        if let Some(filter) = lookup("MEDISTOCK_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "medistock", "medistock")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves a requested page size against the listing limits.
    pub fn page_size(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.listing.default_page_size)
            .min(self.listing.max_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.snapshot.path, None);
        assert_eq!(config.listing.default_page_size, 10);
        assert_eq!(config.listing.max_page_size, 1000);
        assert_eq!(config.logging.filter, "info,medistock=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listing]
            max_page_size = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.max_page_size, 200);
        assert_eq!(config.listing.default_page_size, 10);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.listing.max_page_size = 0;
        assert!(config.validate().is_err());

        config.listing.max_page_size = 50;
        config.listing.default_page_size = 100;
        assert!(config.validate().is_err());

        config.listing.default_page_size = 50;
        assert!(config.validate().is_ok());

        config.logging.filter = "info,medistock=loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(env(&[
            ("MEDISTOCK_SNAPSHOT_PATH", "/tmp/inventory.json"),
            ("MEDISTOCK_PAGE_SIZE", "25"),
            ("MEDISTOCK_MAX_PAGE_SIZE", "not-a-number"),
            ("MEDISTOCK_LOG", "warn"),
        ]));
        assert_eq!(
            config.snapshot.path,
            Some(PathBuf::from("/tmp/inventory.json"))
        );
        assert_eq!(config.listing.default_page_size, 25);
        assert_eq!(config.listing.max_page_size, 1000);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_page_size_is_capped() {
        let mut config = AppConfig::default();
        config.listing.max_page_size = 100;
        assert_eq!(config.page_size(None), 10);
        assert_eq!(config.page_size(Some(50)), 50);
        assert_eq!(config.page_size(Some(5000)), 100);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        config.snapshot.path = Some(PathBuf::from("/data/inventory.json"));
        config.listing.default_page_size = 20;

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let loaded = AppConfig::from_file(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::from_file(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[listing\nmax_page_size = ").unwrap();
        assert!(matches!(
            AppConfig::from_file(Some(path)),
            Err(AppError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_load_reports_a_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[listing]\nmax_page_size = \"many\"\n").unwrap();

        // No silent fallback to defaults
        let err = AppConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, AppError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[listing]"));
        assert!(toml_str.contains("[logging]"));
    }
}
