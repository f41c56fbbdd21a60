//! Unified path management for academy configuration files.
//!
//! Every file the client writes lives under one config directory resolved
//! here, so tests can redirect the whole tree with a single base path.

use academy_core::{AcademyError, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "academy-admin";

/// Unified path management for the admin client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/academy-admin/     # Config directory
/// ├── config.toml              # Application configuration
/// ├── session/                 # Persisted credentials, one file per key
/// │   ├── token
/// │   └── user
/// └── logs/                    # Application logs
///     └── academy.log.YYYY-MM-DD
///
/// ~/Downloads/                 # Default CSV export directory
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademyPaths {
    config_dir: PathBuf,
    export_dir: PathBuf,
}

impl AcademyPaths {
    /// Resolves the platform directories.
    ///
    /// With `base`, everything (exports included) is placed under that
    /// directory instead.
    pub fn new(base: Option<&Path>) -> Result<Self> {
        match base {
            Some(base) => Ok(Self {
                config_dir: base.to_path_buf(),
                export_dir: base.join("exports"),
            }),
            None => {
                let config_dir = dirs::config_dir()
                    .ok_or_else(|| AcademyError::config("Cannot find config directory"))?
                    .join(APP_DIR_NAME);
                let export_dir = dirs::download_dir()
                    .or_else(|| std::env::current_dir().ok())
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok(Self {
                    config_dir,
                    export_dir,
                })
            }
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Directory holding the persisted `token` and `user` files.
    ///
    /// # Security Note
    ///
    /// Files in this directory are written with mode 600 on Unix.
    pub fn session_dir(&self) -> PathBuf {
        self.config_dir.join("session")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    /// Default destination of CSV exports when the config does not name one.
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}
