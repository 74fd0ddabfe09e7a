//! CLI command definitions using clap

use crate::models::{Priority, Recurrence};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// To-do list with undo/redo
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory (defaults to $TASKDECK_DIR, then ~/.taskdeck)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// One line typed into the interactive shell
#[derive(Parser, Debug)]
#[command(name = "taskdeck", no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Priority (high, medium, low)
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Due date (YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339)
        #[arg(long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,

        /// Repeat (daily, weekly, monthly)
        #[arg(short, long, value_parser = parse_recurrence)]
        recurring: Option<Recurrence>,

        /// Notes, with **bold**, *italic* and __underline__ markup
        #[arg(short, long)]
        notes: Option<String>,

        /// Additional note (repeatable)
        #[arg(long = "also")]
        additional_notes: Vec<String>,
    },

    /// List tasks
    List {
        /// Show the stored order instead of the sorted view
        #[arg(short, long)]
        stored: bool,
    },

    /// Show task details
    Show {
        /// Task ID, or #N for the N-th task in stored order
        id: String,
    },

    /// Mark task(s) completed, or open again if already completed
    #[command(alias = "complete")]
    Toggle {
        /// Task ID(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Update task properties
    Edit {
        /// Task ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New priority
        #[arg(short, long, value_parser = parse_priority, conflicts_with = "no_priority")]
        priority: Option<Priority>,

        /// Remove the priority
        #[arg(long)]
        no_priority: bool,

        /// New due date
        #[arg(long, value_parser = parse_due, conflicts_with = "no_due")]
        due: Option<DateTime<Utc>>,

        /// Remove the due date
        #[arg(long)]
        no_due: bool,

        /// New repeat
        #[arg(short, long, value_parser = parse_recurrence, conflicts_with = "no_recurring")]
        recurring: Option<Recurrence>,

        /// Stop repeating
        #[arg(long)]
        no_recurring: bool,

        /// New notes
        #[arg(short, long, conflicts_with = "no_notes")]
        notes: Option<String>,

        /// Remove the notes
        #[arg(long)]
        no_notes: bool,

        /// Append an additional note (repeatable)
        #[arg(long = "also")]
        additional_notes: Vec<String>,

        /// Remove the N-th additional note (starting at 1)
        #[arg(long)]
        drop_note: Option<usize>,

        /// Attach a file (repeatable)
        #[arg(long)]
        attach: Vec<PathBuf>,

        /// Remove the N-th attachment (starting at 1)
        #[arg(long)]
        detach: Option<usize>,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Move a task within the stored order (positions start at 1)
    #[command(name = "move")]
    Move { from: usize, to: usize },

    /// Import tasks from a plain-text file
    Import { file: PathBuf },

    /// Export tasks as plain text (to stdout when no file is given)
    Export { file: Option<PathBuf> },

    /// Print shareable text for a task, or for the whole list
    Share { id: Option<String> },

    /// Show upcoming due-date reminders
    Reminders,

    /// Undo the last change made in this session
    Undo,

    /// Redo the last undone change
    Redo,

    /// Show the undo history of this session
    History,

    /// Start an interactive session where undo/redo span commands
    Shell,

    /// Show or change settings
    Config {
        /// Keep at most N undoable actions
        #[arg(long, conflicts_with = "unbounded")]
        max_history: Option<usize>,

        /// Keep every undoable action
        #[arg(long)]
        unbounded: bool,

        /// Put undone deletions back at their old position (true/false)
        #[arg(long)]
        restore_deleted_position: Option<bool>,
    },
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse()
}

fn parse_recurrence(s: &str) -> Result<Recurrence, String> {
    s.parse()
}

/// Parse a due date. Dates without a zone are taken as UTC.
pub fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| format!("Invalid date: {}", e))
}

/// Split a shell line into arguments, honouring single and double quotes
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_due_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(parse_due("2026-03-14").unwrap(), expected);

        let expected = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(parse_due("2026-03-14 09:30").unwrap(), expected);
        assert_eq!(parse_due("2026-03-14T10:30:00+01:00").unwrap(), expected);

        assert!(parse_due("tomorrow").is_err());
    }

    #[test]
    fn test_split_line() {
        assert_eq!(
            split_line("add \"Buy milk\" -p high").unwrap(),
            vec!["add", "Buy milk", "-p", "high"]
        );
        assert_eq!(split_line("  list   ").unwrap(), vec!["list"]);
        assert_eq!(
            split_line("edit 1 --notes 'say \"hi\"'").unwrap(),
            vec!["edit", "1", "--notes", "say \"hi\""]
        );
        assert_eq!(split_line("add \"\"").unwrap(), vec!["add", ""]);
        assert!(split_line("").unwrap().is_empty());
        assert!(split_line("add \"oops").is_err());
    }

    #[test]
    fn test_parse_cli() {
        let cli = Cli::try_parse_from([
            "taskdeck", "add", "Write report", "-p", "high", "--due", "2026-03-14",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                title,
                priority,
                due,
                ..
            } => {
                assert_eq!(title, "Write report");
                assert_eq!(priority, Some(Priority::High));
                assert!(due.is_some());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_shell_line() {
        let line = ShellLine::try_parse_from(["move", "1", "3"]).unwrap();
        assert_eq!(line.command, Commands::Move { from: 1, to: 3 });

        let line = ShellLine::try_parse_from(["complete", "abc"]).unwrap();
        assert_eq!(
            line.command,
            Commands::Toggle {
                ids: vec!["abc".to_string()]
            }
        );

        assert!(ShellLine::try_parse_from(["bogus"]).is_err());
    }

    #[test]
    fn test_edit_due_conflicts() {
        assert!(
            ShellLine::try_parse_from(["edit", "1", "--due", "2026-01-01", "--no-due"]).is_err()
        );
    }

    #[test]
    fn test_edit_clear_flags_conflict_with_values() {
        assert!(ShellLine::try_parse_from(["edit", "1", "-p", "high", "--no-priority"]).is_err());
        assert!(ShellLine::try_parse_from(["edit", "1", "-r", "daily", "--no-recurring"]).is_err());
        assert!(ShellLine::try_parse_from(["edit", "1", "-n", "x", "--no-notes"]).is_err());
    }

    #[test]
    fn test_parse_edit_lists() {
        let line = ShellLine::try_parse_from([
            "edit", "1", "--also", "a", "--also", "b", "--drop-note", "2", "--attach", "x.txt",
        ])
        .unwrap();
        match line.command {
            Commands::Edit {
                additional_notes,
                drop_note,
                attach,
                detach,
                ..
            } => {
                assert_eq!(additional_notes, vec!["a", "b"]);
                assert_eq!(drop_note, Some(2));
                assert_eq!(attach, vec![PathBuf::from("x.txt")]);
                assert!(detach.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config() {
        let line = ShellLine::try_parse_from([
            "config", "--max-history", "20", "--restore-deleted-position", "true",
        ])
        .unwrap();
        assert_eq!(
            line.command,
            Commands::Config {
                max_history: Some(20),
                unbounded: false,
                restore_deleted_position: Some(true),
            }
        );
        assert!(
            ShellLine::try_parse_from(["config", "--max-history", "2", "--unbounded"]).is_err()
        );
    }
}
