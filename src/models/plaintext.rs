//! Plain-text import, export and share formats

use crate::models::task::Task;
use chrono::{DateTime, Utc};

/// Record delimiter line
const RECORD_DELIMITER: &str = "---";

/// Title given to imported records whose first line is blank
const UNTITLED: &str = "Untitled Task";

/// A task-shaped record read from an import file, before it gets an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub title: String,
    pub notes: Option<String>,
}

impl ImportRecord {
    /// Turn the record into a fresh, incomplete task
    pub fn into_task(self, id: String, created_at: DateTime<Utc>) -> Task {
        let mut task = Task::new(id, self.title);
        task.created_at = created_at;
        task.notes = self.notes;
        task
    }
}

/// Parse an import file into records.
///
/// Records are separated by `---` lines. The first line of a record is the
/// title and the second the notes; anything after is ignored. Blank records
/// are skipped.
pub fn parse_import(content: &str) -> Vec<ImportRecord> {
    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim_end() == RECORD_DELIMITER {
            records.extend(build_record(&current));
            current.clear();
        } else {
            current.push(line);
        }
    }
    records.extend(build_record(&current));

    records
}

fn build_record(lines: &[&str]) -> Option<ImportRecord> {
    // Leading and trailing blank lines belong to the separator, not the record
    let start = lines.iter().position(|l| !l.trim().is_empty())?;
    let mut body = lines[start..].iter().map(|l| l.trim());

    let title = body.next().unwrap_or_default();
    let notes = body.next().unwrap_or_default();

    Some(ImportRecord {
        title: if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        },
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

/// Serialize tasks into the export format, one `title\nnotes\n---\n` record each
pub fn serialize_export(tasks: &[Task]) -> String {
    let mut result = String::new();
    for task in tasks {
        result.push_str(&task.title);
        result.push('\n');
        result.push_str(task.notes_text());
        result.push('\n');
        result.push_str(RECORD_DELIMITER);
        result.push('\n');
    }
    result
}

/// Plain-text rendering of one task for sharing
pub fn share_text(task: &Task) -> String {
    let mut text = format!("Task: {}\n", task.title);
    match task.priority {
        Some(p) => text.push_str(&format!("Priority: {}\n", p)),
        None => text.push_str("Priority: none\n"),
    }
    if let Some(due) = task.due_date {
        text.push_str(&format!("Due Date: {}\n", due.format("%Y-%m-%d")));
    }
    if let Some(notes) = task.notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!("Notes: {}", notes));
    }
    text
}

/// Plain-text rendering of the whole list for sharing
pub fn share_list_text(tasks: &[Task]) -> String {
    let items: Vec<String> = tasks.iter().map(|t| format!("- {}", t.title)).collect();
    format!("My To-Do List:\n\n{}", items.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::Priority;
    use chrono::TimeZone;

    #[test]
    fn test_parse_import_three_records() {
        let records = parse_import("T1\nN1\n---\nT2\nN2\n---\nT3\nN3\n---\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "T1");
        assert_eq!(records[0].notes.as_deref(), Some("N1"));
        assert_eq!(records[2].title, "T3");
        assert_eq!(records[2].notes.as_deref(), Some("N3"));
    }

    #[test]
    fn test_parse_import_without_trailing_delimiter() {
        let records = parse_import("Only title");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Only title");
        assert!(records[0].notes.is_none());
    }

    #[test]
    fn test_parse_import_skips_blank_records() {
        let records = parse_import("\n---\n\nA\nnote\n---\n\n---\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_parse_import_tolerates_crlf_and_padding() {
        let records = parse_import("  A  \r\n  n  \r\n---\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[0].notes.as_deref(), Some("n"));
    }

    #[test]
    fn test_parse_import_empty() {
        assert!(parse_import("").is_empty());
        assert!(parse_import("---\n---\n").is_empty());
    }

    #[test]
    fn test_serialize_export() {
        let mut a = Task::new("1", "A");
        a.notes = Some("first".to_string());
        let b = Task::new("2", "B");

        let content = serialize_export(&[a, b]);
        assert_eq!(content, "A\nfirst\n---\nB\n\n---\n");
    }

    #[test]
    fn test_export_then_import_keeps_titles_and_notes() {
        let mut a = Task::new("1", "Pay rent");
        a.notes = Some("before the 5th".to_string());
        let b = Task::new("2", "Stretch");

        let records = parse_import(&serialize_export(&[a, b]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Pay rent");
        assert_eq!(records[0].notes.as_deref(), Some("before the 5th"));
        assert_eq!(records[1].title, "Stretch");
        assert!(records[1].notes.is_none());
    }

    #[test]
    fn test_into_task() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let record = ImportRecord {
            title: "A".to_string(),
            notes: Some("n".to_string()),
        };
        let task = record.into_task("abc".to_string(), now);
        assert_eq!(task.id, "abc");
        assert_eq!(task.created_at, now);
        assert!(!task.completed);
        assert_eq!(task.notes.as_deref(), Some("n"));
    }

    #[test]
    fn test_share_text() {
        let mut task = Task::new("1", "Dentist");
        task.priority = Some(Priority::High);
        task.due_date = Some(Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap());
        task.notes = Some("bring card".to_string());

        assert_eq!(
            share_text(&task),
            "Task: Dentist\nPriority: high\nDue Date: 2026-05-04\nNotes: bring card"
        );
    }

    #[test]
    fn test_share_text_minimal() {
        let task = Task::new("1", "Nap");
        assert_eq!(share_text(&task), "Task: Nap\nPriority: none\n");
    }

    #[test]
    fn test_share_list_text() {
        let tasks = vec![Task::new("1", "A"), Task::new("2", "B")];
        assert_eq!(share_list_text(&tasks), "My To-Do List:\n\n- A\n- B");
    }
}
