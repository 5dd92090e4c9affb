//! Path management for DuoSpend
//!
//! ## Path Resolution Order
//!
//! 1. `DUOSPEND_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `duospend`
//!    (`~/.config/duospend` on Linux, `%APPDATA%\duospend` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::DuoSpendError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "DUOSPEND_DATA_DIR";

/// Manages all paths used by DuoSpend
#[derive(Debug, Clone)]
pub struct DuoSpendPaths {
    base_dir: PathBuf,
}

impl DuoSpendPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, DuoSpendError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DuoSpendPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to projects.json
    pub fn projects_file(&self) -> PathBuf {
        self.data_dir().join("projects.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DuoSpendError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DuoSpendError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DuoSpendError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if DuoSpend has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, DuoSpendError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| DuoSpendError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("duospend"))
}
