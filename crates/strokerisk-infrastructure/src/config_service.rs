//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/strokerisk/config.toml`). A missing file is not an error: every
//! section falls back to its defaults.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use strokerisk_core::config::AppConfig;
use strokerisk_core::{Result, StrokeRiskError};
use tracing::{debug, info};

use crate::paths::StrokeRiskPaths;

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from `path`. Nothing is read until the
    /// first call to [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading from the platform config directory.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(StrokeRiskPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn load(&self) -> Result<AppConfig> {
        {
            let cached = self.config.read().map_err(|_| poisoned())?;
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = Self::read_file(&self.path)?;

        let mut cache = self.config.write().map_err(|_| poisoned())?;
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) -> Result<()> {
        let mut cache = self.config.write().map_err(|_| poisoned())?;
        *cache = None;
        Ok(())
    }

    /// Writes `config` to the file, creating parent directories as needed.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        info!("Saved configuration to {}", self.path.display());

        let mut cache = self.config.write().map_err(|_| poisoned())?;
        *cache = Some(config.clone());
        Ok(())
    }

    fn read_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn poisoned() -> StrokeRiskError {
    StrokeRiskError::internal("config cache lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_loads_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\nsign_in_route = \"/signin\"\n\n[emergency]\nphone_number = \"911\"\n",
        )
        .unwrap();

        let config = ConfigService::new(&path).load().unwrap();
        assert_eq!(config.session.sign_in_route, "/signin");
        assert_eq!(config.emergency.phone_number, "911");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[mock\nscan_latency_ms = ").unwrap();

        let err = ConfigService::new(&path).load().unwrap_err();
        assert!(matches!(err, StrokeRiskError::Serialization { .. }));
    }

    #[test]
    fn test_save_then_reload_after_invalidate() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(dir.path().join("nested").join("config.toml"));

        let mut config = AppConfig::default();
        config.risk.high_above = 80;
        service.save(&config).unwrap();
        service.invalidate_cache().unwrap();

        assert_eq!(service.load().unwrap().risk.high_above, 80);
    }

    #[test]
    fn test_cache_survives_file_change() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::new(&path);
        assert_eq!(service.load().unwrap().emergency.phone_number, "108");

        std::fs::write(&path, "[emergency]\nphone_number = \"112\"\n").unwrap();
        assert_eq!(service.load().unwrap().emergency.phone_number, "108");

        service.invalidate_cache().unwrap();
        assert_eq!(service.load().unwrap().emergency.phone_number, "112");
    }
}
