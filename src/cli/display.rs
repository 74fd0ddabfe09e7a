//! Display formatting for CLI output

use crate::models::{Action, Task};
use crate::reminders::Reminder;
use crate::tasks::History;
use chrono::{DateTime, Utc};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

/// Task row for table display
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Repeats")]
    recurring: String,
}

impl TaskRow {
    fn new(position: usize, task: &Task, now: DateTime<Utc>) -> Self {
        let due = task.due_date.map(format_due).unwrap_or_default();
        TaskRow {
            position: position.to_string(),
            id: task.id.clone(),
            done: if task.completed { "x" } else { "" }.to_string(),
            title: truncate(&task.title, 40),
            priority: task.priority.map(|p| p.to_string()).unwrap_or_default(),
            due: if task.is_overdue(now) {
                format!("{} (overdue)", due)
            } else {
                due
            },
            recurring: task.recurring.map(|r| r.to_string()).unwrap_or_default(),
        }
    }
}

/// Render tasks as a table. Each entry carries its 1-based stored position.
pub fn format_task_list(tasks: &[(usize, &Task)], now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Add a task to get started!".to_string();
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|(position, task)| TaskRow::new(*position, task, now))
        .collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::right()))
        .to_string()
}

/// Render detailed task information
pub fn format_task_detail(task: &Task) -> String {
    let mut lines = vec![
        format!("ID:        {}", task.id),
        format!("Title:     {}", task.title),
        format!(
            "Status:    {}",
            if task.completed { "completed" } else { "open" }
        ),
    ];

    if let Some(priority) = task.priority {
        lines.push(format!("Priority:  {}", priority));
    }
    if let Some(due) = task.due_date {
        lines.push(format!("Due:       {}", format_due(due)));
    }
    if let Some(recurring) = task.recurring {
        lines.push(format!("Repeats:   {}", recurring));
    }

    lines.push(format!(
        "Created:   {}",
        task.created_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if task.was_shared() {
        lines.push("Shared:    yes".to_string());
    }

    if !task.attachments.is_empty() {
        let names: Vec<&str> = task.attachments.iter().map(|a| a.name.as_str()).collect();
        lines.push(format!("Files:     {}", names.join(", ")));
    }

    if let Some(notes) = task.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.push(notes.to_string());
    }

    for note in &task.additional_notes {
        lines.push(format!("  - {}", note));
    }

    lines.join("\n")
}

/// History row for table display
#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "")]
    marker: String,
}

/// Render the action log, marking the cursor and undone actions
pub fn format_history(history: &History) -> String {
    if history.is_empty() {
        return "No changes in this session.".to_string();
    }

    let cursor = history.current_index();
    let rows: Vec<HistoryRow> = history
        .actions()
        .enumerate()
        .map(|(i, action): (usize, &Action)| HistoryRow {
            index: (i + 1).to_string(),
            kind: action.kind().to_string(),
            action: truncate(&action.to_string(), 50),
            marker: match cursor {
                Some(c) if c == i => "<- current".to_string(),
                Some(c) if i < c => String::new(),
                _ => "(undone)".to_string(),
            },
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::right()))
        .to_string()
}

/// Reminder row for table display
#[derive(Tabled)]
struct ReminderRow {
    #[tabled(rename = "When")]
    at: String,
    #[tabled(rename = "Alert")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Render upcoming reminders
pub fn format_reminders(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "No upcoming reminders.".to_string();
    }

    let rows: Vec<ReminderRow> = reminders
        .iter()
        .map(|r| ReminderRow {
            at: r.at.format("%Y-%m-%d %H:%M").to_string(),
            kind: r.kind.to_string(),
            message: truncate(&r.message, 60),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn format_due(due: DateTime<Utc>) -> String {
    if due.format("%H:%M").to_string() == "00:00" {
        due.format("%Y-%m-%d").to_string()
    } else {
        due.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format for error messages
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}
