//! The task list, its undo/redo history, and the session tying them together

pub mod history;
pub mod session;
pub mod store;

pub use history::{DeleteUndo, History};
pub use session::Session;
pub use store::{StoreError, TaskStore};
