//! Storage layer: data directory, configuration and task snapshots

pub mod config;
pub mod id_generator;
pub mod location;
pub mod snapshot;

pub use config::{Config, ConfigError};
pub use id_generator::IdGenerator;
pub use location::{DataLocation, LocationError};
pub use snapshot::{
    FileKv, KeyValueStore, MemoryKv, SnapshotError, TASKS_KEY, load_tasks, save_tasks,
};
