//! # Wiring
//!
//! Resolves where rules live and what configuration applies, then builds a
//! [`RestyleApi`] over a [`FileStore`].
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data <dir>`), used as-is.
//! 2. `RESTYLE_DATA` environment variable. Primarily used by tests to isolate state.
//! 3. The OS-appropriate data directory (via the `directories` crate).
//!
//! The directory is created lazily by the first write; reading from a
//! directory that does not exist yet yields an empty store.
//!
//! ## Config File
//!
//! `restyle.toml` is looked up in the OS config directory, unless
//! `RESTYLE_CONFIG` points at a specific file. See [`crate::config`].

use crate::api::RestyleApi;
use crate::config::{RestyleConfig, CONFIG_FILE_NAME};
use crate::error::{RestyleError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::memory::FileStore;
use crate::store::rule_store::RuleStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_DIR_ENV: &str = "RESTYLE_DATA";
pub const CONFIG_PATH_ENV: &str = "RESTYLE_CONFIG";

pub struct RestyleContext {
    pub api: RestyleApi<FileStore>,
    pub config: RestyleConfig,
    pub data_dir: PathBuf,
    /// `None` when no config directory could be determined.
    pub config_file: Option<PathBuf>,
}

impl RestyleContext {
    /// Full path of the rule map file.
    pub fn data_file(&self) -> PathBuf {
        self.api.store().backend().data_file()
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "restyle", "restyle")
        .ok_or_else(|| RestyleError::Config("Could not determine home directory".to_string()))
}

fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(project_dirs()?.data_dir().to_path_buf())
}

fn resolve_config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "restyle", "restyle")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Initialize the restyle context: resolve paths, load config, open the store.
///
/// # Environment Variables
///
/// * `RESTYLE_DATA` - Overrides the default data directory.
/// * `RESTYLE_CONFIG` - Overrides the config file location.
/// * `RESTYLE_DATA_FILE`, `RESTYLE_LOG` - Override config keys.
pub fn initialize(data_override: Option<PathBuf>) -> Result<RestyleContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config_file = resolve_config_file();
    let config = match &config_file {
        Some(path) => RestyleConfig::load_from(path)?,
        None => RestyleConfig::from_env()?,
    };

    debug!(
        data_dir = %data_dir.display(),
        config_file = ?config_file,
        data_file = %config.data_file,
        "initializing restyle"
    );

    let backend = FsBackend::new(data_dir.clone()).with_file_name(&config.data_file);
    let api = RestyleApi::new(RuleStore::with_backend(backend));

    Ok(RestyleContext {
        api,
        config,
        data_dir,
        config_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_is_used_as_data_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("rules-here");
        let ctx = initialize(Some(dir.clone())).unwrap();

        assert_eq!(ctx.data_dir, dir);
        assert_eq!(ctx.data_file(), dir.join(&ctx.config.data_file));
    }

    #[test]
    fn test_missing_data_dir_reads_empty_then_saves() {
        use crate::store::DataStore;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("not-yet");
        let ctx = initialize(Some(dir.clone())).unwrap();

        assert!(ctx.api.store().get_all().unwrap().is_empty());
        ctx.api.save_rule("a.com", "", "p{}").unwrap();
        assert!(ctx.data_file().exists());
    }
}
