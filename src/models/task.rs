//! Task model and related types

use base64::prelude::{BASE64_STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank used by the display order (lower sorts first)
    pub fn rank(priority: Option<Priority>) -> u8 {
        match priority {
            Some(Priority::High) => 0,
            Some(Priority::Medium) => 1,
            Some(Priority::Low) => 2,
            None => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "hi" => Ok(Priority::High),
            "medium" | "med" => Ok(Priority::Medium),
            "low" | "lo" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// How often a task repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Recurrence::Daily),
            "weekly" | "week" => Ok(Recurrence::Weekly),
            "monthly" | "month" => Ok(Recurrence::Monthly),
            _ => Err(format!("Unknown recurrence: {}", s)),
        }
    }
}

/// A file attached to a task. `data` holds the content as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub data: String,
}

impl Attachment {
    /// Encode file content as a data URL, guessing the media type from the name
    pub fn encode(name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let data = format!(
            "data:{};base64,{}",
            media_type(&name),
            BASE64_STANDARD.encode(bytes)
        );
        Attachment { name, data }
    }
}

fn media_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// A to-do item with all its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    /// Rich text with inline markup (bold, italic, underline, color spans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared: Option<bool>,
}

impl Task {
    /// Create a new incomplete task with the given id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
            priority: None,
            due_date: None,
            recurring: None,
            notes: None,
            additional_notes: Vec::new(),
            attachments: Vec::new(),
            shared: None,
        }
    }

    /// Check if the title carries any visible text
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Check if the task is past its due date and still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Notes text, empty when unset
    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Copy of this task with `completed` flipped
    pub fn toggled(&self) -> Task {
        Task {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Whether the task was shared at least once
    pub fn was_shared(&self) -> bool {
        self.shared.unwrap_or(false)
    }
}
