//! User configuration stored as YAML in the data directory

use crate::tasks::{DeleteUndo, History};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Settings that shape a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Maximum number of undoable actions kept; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
    /// Put a task back where it was when its deletion is undone, instead of
    /// appending it to the end of the list
    pub restore_deleted_position: bool,
}

impl Config {
    /// Load from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// An empty history configured by these settings
    pub fn history(&self) -> History {
        let mode = if self.restore_deleted_position {
            DeleteUndo::RestorePosition
        } else {
            DeleteUndo::Append
        };

        let history = History::new().with_delete_undo(mode);
        match self.max_history {
            Some(max) => history.with_max_len(max),
            None => history,
        }
    }
}
