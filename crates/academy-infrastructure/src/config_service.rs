//! Configuration service implementation.
//!
//! Loads `AcademyConfig` from `config.toml` and caches it.

use crate::storage::AtomicFile;
use academy_core::config::AcademyConfig;
use academy_core::{AcademyError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration service that loads and caches the root configuration.
///
/// A missing or empty file yields the defaults; a malformed file is an
/// error rather than a silent fallback.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AcademyConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AcademyConfig> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Writes `config` to the file and refreshes the cache.
    pub fn save(&self, config: &AcademyConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        AtomicFile::new(self.path.clone()).write(&content)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        tracing::info!(path = %self.path.display(), "Saved configuration");
        Ok(())
    }

    fn load(&self) -> Result<AcademyConfig> {
        let Some(content) = AtomicFile::new(self.path.clone()).read()? else {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AcademyConfig::default());
        };
        if content.trim().is_empty() {
            return Ok(AcademyConfig::default());
        }
        toml::from_str(&content).map_err(|e| {
            AcademyError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config().unwrap(), AcademyConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"http://localhost:9000\"\n").unwrap();

        let service = ConfigService::new(path.clone());
        let config = service.get_config().unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:9000"));

        fs::write(&path, "[api]\nbase_url = \"http://changed\"\n").unwrap();
        assert_eq!(
            service.get_config().unwrap().api.base_url.as_deref(),
            Some("http://localhost:9000")
        );

        service.invalidate_cache();
        assert_eq!(
            service.get_config().unwrap().api.base_url.as_deref(),
            Some("http://changed")
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = ConfigService::new(path).get_config().unwrap_err();
        assert!(matches!(err, AcademyError::Config(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        let mut config = AcademyConfig::default();
        config.auth.allowed_roles = vec!["ADMIN".into()];
        service.save(&config).unwrap();

        let reloaded = ConfigService::new(path).get_config().unwrap();
        assert_eq!(reloaded.auth.allowed_roles, vec!["ADMIN"]);
    }
}
