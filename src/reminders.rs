//! Due-date reminder schedule
//!
//! Firing the reminders is up to the caller; this module only works out
//! when they are due and what they say.

use crate::models::Task;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// Lead time of the early reminder
pub const LEAD_TIME_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// Fires ahead of the due time
    DueSoon,
    /// Fires at the due time
    Due,
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::DueSoon => write!(f, "Task Reminder"),
            ReminderKind::Due => write!(f, "Task Due"),
        }
    }
}

/// A one-shot alert for a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: String,
    pub kind: ReminderKind,
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Reminders for one task: one 30 minutes before it is due (or right away if
/// that moment has passed) and one at the due time. Completed, undated and
/// already-due tasks get none.
pub fn reminders_for(task: &Task, now: DateTime<Utc>) -> Vec<Reminder> {
    let Some(due) = task.due_date else {
        return Vec::new();
    };
    if task.completed || due <= now {
        return Vec::new();
    }

    let early = (due - Duration::minutes(LEAD_TIME_MINUTES)).max(now);

    vec![
        Reminder {
            task_id: task.id.clone(),
            kind: ReminderKind::DueSoon,
            at: early,
            message: format!(
                "Your task \"{}\" is due in {} minutes.",
                task.title, LEAD_TIME_MINUTES
            ),
        },
        Reminder {
            task_id: task.id.clone(),
            kind: ReminderKind::Due,
            at: due,
            message: format!("Your task \"{}\" is now due.", task.title),
        },
    ]
}

/// Reminders for a whole list, earliest first
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = tasks.iter().flat_map(|t| reminders_for(t, now)).collect();
    reminders.sort_by_key(|r| r.at);
    reminders
}
