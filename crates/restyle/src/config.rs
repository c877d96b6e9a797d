//! # Configuration
//!
//! Restyle configuration is managed by [`confique`], which layers environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `RESTYLE_DATA_FILE`, `RESTYLE_LOG`.
//! 2. **Config file**: `restyle.toml` in the OS-appropriate config directory
//!    (via `directories` crate). A missing file is not an error.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `rules.json` | File name of the rule map inside the data directory |
//! | `log_filter` | `restyle=warn` | `tracing` filter directive used by the CLI |
//!
//! The data directory itself is not a config key: it comes from `--data` or
//! `RESTYLE_DATA`, see [`crate::init`].

use crate::error::{RestyleError, Result};
use crate::store::fs_backend::DEFAULT_DATA_FILE;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "restyle.toml";

/// Configuration for restyle, stored in `restyle.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RestyleConfig {
    /// File name of the rule map inside the data directory.
    #[config(default = "rules.json", env = "RESTYLE_DATA_FILE")]
    pub data_file: String,

    /// Filter directive for log output (e.g. "restyle=debug").
    #[config(default = "restyle=warn", env = "RESTYLE_LOG")]
    pub log_filter: String,
}

impl Default for RestyleConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            log_filter: "restyle=warn".to_string(),
        }
    }
}

impl RestyleConfig {
    /// Loads env over `path` over defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| RestyleError::Config(e.to_string()))?;
        config.validated()
    }

    /// Loads env over defaults, for hosts without a config directory.
    pub fn from_env() -> Result<Self> {
        let config = Self::builder()
            .env()
            .load()
            .map_err(|e| RestyleError::Config(e.to_string()))?;
        config.validated()
    }

    /// The data file must be a bare file name; it is joined onto the data dir.
    fn validated(self) -> Result<Self> {
        let name = self.data_file.trim();
        let bare = Path::new(name)
            .file_name()
            .is_some_and(|f| f == std::ffi::OsStr::new(name));
        if name.is_empty() || !bare {
            return Err(RestyleError::Config(format!(
                "data_file must be a plain file name, got \"{}\"",
                self.data_file
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RestyleConfig::default();
        assert_eq!(config.data_file, "rules.json");
        assert_eq!(config.log_filter, "restyle=warn");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = RestyleConfig::load_from(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.data_file, "rules.json");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "data_file = \"styles.json\"\n").unwrap();

        let config = RestyleConfig::load_from(&path).unwrap();
        assert_eq!(config.data_file, "styles.json");
        assert_eq!(config.log_filter, "restyle=warn");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "data_file = [").unwrap();

        assert!(matches!(
            RestyleConfig::load_from(&path),
            Err(RestyleError::Config(_))
        ));
    }

    #[test]
    fn test_data_file_with_directory_is_rejected() {
        let config = RestyleConfig {
            data_file: "../elsewhere/rules.json".to_string(),
            ..Default::default()
        };
        assert!(config.validated().is_err());

        let config = RestyleConfig {
            data_file: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validated().is_err());
    }
}
