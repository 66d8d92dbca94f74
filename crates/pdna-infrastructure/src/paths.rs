//! Unified path management for Parent DNA local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pdna/              # Config directory
//! ├── config.toml              # Application configuration
//! ├── admin_session.json       # Last admin activity timestamp
//! └── logs/                    # Console logs
//!     └── pdna-console.log.YYYY-MM-DD
//!
//! ~/.local/share/pdna/         # Data directory
//! ├── store/                   # Directory document store (one dir per collection)
//! └── outbox/                  # Inquiry mail written by the outbox sender
//! ```
//!
//! Setting `PDNA_CONFIG_DIR` moves the config directory and places the data
//! directory at `$PDNA_CONFIG_DIR/data`.

use std::path::{Path, PathBuf};

use pdna_core::error::{PdnaError, Result};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PDNA_CONFIG_DIR";

const APP_DIR_NAME: &str = "pdna";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdnaPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PdnaPaths {
    /// Resolves paths from the environment and the platform directories.
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(dir)));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| PdnaError::config("Cannot determine the platform config directory"))?
            .join(APP_DIR_NAME);
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PdnaError::config("Cannot determine the platform data directory"))?
            .join(APP_DIR_NAME);

        Ok(Self { config_dir, data_dir })
    }

    /// Keeps everything under a single root (`<root>` and `<root>/data`).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            config_dir: root,
        }
    }

    /// Replaces the data directory when an override is given.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.config_dir.join("admin_session.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Root of the directory document store.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.data_dir.join("outbox")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root_layout() {
        let paths = PdnaPaths::with_root("/tmp/pdna-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/pdna-test/config.toml"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/pdna-test/admin_session.json"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/pdna-test/logs"));
        assert_eq!(paths.store_dir(), PathBuf::from("/tmp/pdna-test/data/store"));
        assert_eq!(paths.outbox_dir(), PathBuf::from("/tmp/pdna-test/data/outbox"));
    }

    #[test]
    fn test_data_dir_override() {
        let paths = PdnaPaths::with_root("/tmp/pdna-test").with_data_dir(Some(PathBuf::from("/srv/pdna")));
        assert_eq!(paths.store_dir(), PathBuf::from("/srv/pdna/store"));
        assert!(paths.config_file().starts_with("/tmp/pdna-test"));

        let unchanged = PdnaPaths::with_root("/tmp/pdna-test").with_data_dir(None);
        assert_eq!(unchanged.data_dir(), Path::new("/tmp/pdna-test/data"));
    }
}
