//! Application configuration handling.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::store::FileStore;

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "gammon";

const DEFAULT_CONFIG: &str = "\
# gammon configuration
#
# data_dir: directory the key/value store keeps its files in.
# Defaults to the platform data directory when unset.
#data_dir = \"/path/to/data\"
";

/// Runtime configuration for the tracker and its store.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory the persistent key/value store lives in.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from the default file location, applying
    /// `GAMMON_*` environment overrides on top.
    pub fn load() -> Result<Self> {
        Self::load_from(config_file_path())
    }

    /// Load configuration from an explicit file path. The file is optional;
    /// built-in defaults and environment overrides still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let defaults = Self::default_data_dir();
        let settings = Config::builder()
            .set_default("data_dir", defaults.to_string_lossy().to_string())?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix("GAMMON"))
            .build()
            .context("failed to assemble configuration")?;
        settings
            .try_deserialize()
            .context("failed to parse configuration")
    }

    /// Platform default for the store directory.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Open the file store configured by `data_dir`.
    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// Default location of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Write a commented default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    let path = config_file_path();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.data_dir, AppConfig::default_data_dir());
        Ok(())
    }

    #[test]
    fn file_overrides_data_dir() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/gammon-test\"\n")?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.data_dir, PathBuf::from("/tmp/gammon-test"));
        Ok(())
    }

    #[test]
    fn store_roots_at_the_configured_directory() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
        };
        assert_eq!(config.store().root(), dir.path());
        Ok(())
    }
}
