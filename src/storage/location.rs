//! Data directory location detection and management

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Data directory name under the home directory
const DATA_DIR: &str = ".taskdeck";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TASKDECK_DIR";

/// Configuration file name within the data directory
const CONFIG_FILE: &str = "config.yaml";

/// Errors related to the data location
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to access home directory")]
    NoHomeDirectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where taskdeck keeps its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocation {
    pub dir: PathBuf,
}

impl DataLocation {
    /// Use a specific directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        DataLocation { dir: dir.into() }
    }

    /// Resolve the data directory: explicit path, then `$TASKDECK_DIR`, then `~/.taskdeck`
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LocationError> {
        if let Some(dir) = explicit {
            return Ok(Self::at(dir));
        }

        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(dir));
        }

        Self::home()
    }

    /// The default location (~/.taskdeck)
    pub fn home() -> Result<Self, LocationError> {
        let home = dirs::home_dir().ok_or(LocationError::NoHomeDirectory)?;
        Ok(Self::at(home.join(DATA_DIR)))
    }

    /// Check if the data directory exists
    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    /// Create the data directory if it doesn't exist
    pub fn ensure_exists(&self) -> Result<(), LocationError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Path of the file holding the value stored under `key`
    pub fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
