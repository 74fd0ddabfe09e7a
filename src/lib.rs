//! taskdeck - to-do list with linear undo/redo history
//!
//! This library provides the ordered task list, the action history that
//! makes every change undoable, and the plain-text and JSON formats used to
//! import, export and persist tasks.

pub mod cli;
pub mod models;
pub mod reminders;
pub mod storage;
pub mod tasks;

pub use models::{Action, Priority, Recurrence, Task};
pub use storage::{Config, DataLocation, FileKv};
pub use tasks::{DeleteUndo, History, Session, StoreError, TaskStore};
