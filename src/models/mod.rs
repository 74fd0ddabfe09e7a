//! Data models for taskdeck

pub mod action;
pub mod plaintext;
pub mod task;

pub use action::Action;
pub use plaintext::{
    ImportRecord, parse_import, serialize_export, share_list_text, share_text,
};
pub use task::{Attachment, Priority, Recurrence, Task};
