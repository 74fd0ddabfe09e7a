//! Task list persistence as a single JSON blob in a key-value store

use crate::models::Task;
use crate::storage::location::{DataLocation, LocationError};
use std::collections::HashMap;
use thiserror::Error;

/// Key the task list is stored under
pub const TASKS_KEY: &str = "advanced-todo-tasks";

/// Errors related to snapshot storage
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode tasks: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// String values stored by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError>;
}

/// One file per key inside the data directory
#[derive(Debug, Clone)]
pub struct FileKv {
    location: DataLocation,
}

impl FileKv {
    pub fn new(location: DataLocation) -> Self {
        FileKv { location }
    }

    pub fn location(&self) -> &DataLocation {
        &self.location
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.location.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.location.ensure_exists()?;

        // Write a sibling file first so a crash never leaves half a blob behind
        let path = self.location.value_path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        MemoryKv::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Save the whole task list
pub fn save_tasks<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tasks: &[Task],
) -> Result<(), SnapshotError> {
    let blob = serde_json::to_string(tasks)?;
    store.set(TASKS_KEY, &blob)?;
    log::debug!("saved {} task(s)", tasks.len());
    Ok(())
}

/// Load the task list.
///
/// Nothing stored means an empty list. A blob that cannot be decoded is
/// logged and also treated as an empty list.
pub fn load_tasks<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Task>, SnapshotError> {
    let Some(blob) = store.get(TASKS_KEY)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Task>>(&blob) {
        Ok(tasks) => {
            log::debug!("loaded {} task(s)", tasks.len());
            Ok(tasks)
        }
        Err(e) => {
            log::warn!("Stored tasks are corrupt, starting empty: {}", e);
            Ok(Vec::new())
        }
    }
}
