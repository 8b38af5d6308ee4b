//! Configuration handling for the contact form

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User configuration for the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Minimum gap between accepted submits
    pub throttle_interval_ms: u64,
    /// Quiet period before live field validation runs
    pub debounce_wait_ms: u64,
    /// Validate on the first keystroke of a burst instead of the last
    pub debounce_immediate: bool,
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: 1000,
            debounce_wait_ms: 300,
            debounce_immediate: false,
            log_filter: None,
        }
    }
}

impl FormConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "contact-form", "contact-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Where the TUI writes its log while it owns the terminal
    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "contact-form", "contact-form")
            .map(|dirs| dirs.data_dir().join("contact-form.log"))
    }

    /// Load configuration from the platform config directory, falling back
    /// to defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(io_err)
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }

    pub fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.throttle_interval(), Duration::from_millis(1000));
        assert_eq!(config.debounce_wait(), Duration::from_millis(300));
        assert!(!config.debounce_immediate);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            throttle_interval_ms: 500,
            debounce_wait_ms: 150,
            debounce_immediate: true,
            log_filter: Some("contact_form=debug".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: FormConfig = serde_json::from_str(r#"{"debounce_wait_ms": 50}"#).unwrap();
        assert_eq!(parsed.debounce_wait_ms, 50);
        assert_eq!(parsed.throttle_interval_ms, 1000);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, FormConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{"throttle_interval_ms": 10, "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.throttle_interval_ms, 10);
    }

    #[test]
    fn test_config_path_points_at_json_file() {
        if let Some(path) = FormConfig::config_path() {
            assert!(path.ends_with("config.json"));
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn test_log_path_is_separate_from_config() {
        if let (Some(log), Some(config)) = (FormConfig::log_path(), FormConfig::config_path()) {
            assert!(log.ends_with("contact-form.log"));
            assert!(log != config);
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FormConfig {
            debounce_immediate: true,
            ..Default::default()
        };

        tokio_test::assert_ok!(config.save_to(&path));
        let loaded = tokio_test::assert_ok!(FormConfig::load_from(&path));
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = FormConfig::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FormConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("invalid config file"));
    }
}
