//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml`, writing the defaults when the file
//! does not exist, and caches the parsed value.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use pdna_core::config::AppConfig;
use pdna_core::error::{PdnaError, Result};

use crate::paths::PdnaPaths;
use crate::storage::AtomicFile;

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_paths(paths: &PdnaPaths) -> Self {
        Self::new(paths.config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| PdnaError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| PdnaError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Validates and persists a configuration, replacing the cached copy.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config.validate()?;
        AtomicFile::<AppConfig>::toml(self.path.clone()).save_locked(config)?;
        tracing::info!("[ConfigService] Saved configuration to {}", self.path.display());

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| PdnaError::internal("config cache lock poisoned"))?;
        *write_lock = Some(config.clone());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let file = AtomicFile::<AppConfig>::toml(self.path.clone());

        match file.load()? {
            Some(config) => {
                config.validate()?;
                tracing::debug!("[ConfigService] Loaded configuration from {}", self.path.display());
                Ok(config)
            }
            None => {
                let default_config = AppConfig::default();
                file.save_locked(&default_config)?;
                tracing::info!(
                    "[ConfigService] No configuration found, wrote defaults to {}",
                    self.path.display()
                );
                Ok(default_config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdna_core::config::StorageBackend;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        let config = service.get_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(service.path().exists());
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());
        assert_eq!(service.get_config().unwrap().storage.backend, StorageBackend::Dir);

        std::fs::write(&path, "[storage]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().storage.backend, StorageBackend::Dir);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_version_is_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[seed]\nversion = \"latest\"\n").unwrap();

        let err = ConfigService::new(path).get_config().unwrap_err();
        assert!(matches!(err, PdnaError::Config(_)));
    }

    #[test]
    fn test_save_updates_cache() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        let mut config = service.get_config().unwrap();
        config.admin.shared_secret = "open sesame".to_string();

        service.save(&config).unwrap();
        assert_eq!(service.get_config().unwrap().admin.shared_secret, "open sesame");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().admin.shared_secret, "open sesame");
    }
}
