//! Command execution and the interactive shell

use crate::cli::commands::{Commands, ShellLine, split_line};
use crate::cli::display::{format_history, format_reminders, format_task_detail, format_task_list};
use crate::models::{Attachment, Task, serialize_export, share_list_text, share_text};
use crate::reminders;
use crate::storage::{Config, IdGenerator, KeyValueStore, save_tasks};
use crate::tasks::{Session, StoreError};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::Path;

/// Reads the answer to a yes/no question already written to the output
pub type Confirm<'a> = dyn FnMut(&str) -> std::io::Result<bool> + 'a;

/// Resolve a task reference: an exact id, or `#N` for the N-th task in stored order
pub fn resolve_id(session: &Session, reference: &str) -> Result<String, StoreError> {
    if session.store().get(reference).is_some() {
        return Ok(reference.to_string());
    }

    if let Some(position) = reference.strip_prefix('#')
        && let Ok(position) = position.parse::<usize>()
    {
        let len = session.tasks().len();
        return position
            .checked_sub(1)
            .and_then(|i| session.tasks().get(i))
            .map(|t| t.id.clone())
            .ok_or(StoreError::IndexOutOfRange {
                index: position,
                len,
            });
    }

    Err(StoreError::NotFound(reference.to_string()))
}

/// Run one command against the session, writing output to `out`.
///
/// Returns true when the task list changed and should be saved.
pub fn execute(
    session: &mut Session,
    command: Commands,
    out: &mut dyn Write,
    confirm: &mut Confirm<'_>,
) -> Result<bool> {
    match command {
        Commands::Add {
            title,
            priority,
            due,
            recurring,
            notes,
            additional_notes,
        } => {
            let mut task = Task::new(IdGenerator::next_id(session.tasks()), title);
            task.priority = priority;
            task.due_date = due;
            task.recurring = recurring;
            task.notes = notes;
            task.additional_notes = additional_notes;

            let added = session.add(task)?;
            writeln!(out, "Added {}: {}", added.id, added.title)?;
            Ok(true)
        }

        Commands::List { stored } => {
            let now = Utc::now();
            let rows: Vec<(usize, &Task)> = if stored {
                session.tasks().iter().enumerate().map(|(i, t)| (i + 1, t)).collect()
            } else {
                let store = session.store();
                store
                    .display_order()
                    .into_iter()
                    .map(|t| (store.position(&t.id).map_or(0, |i| i + 1), t))
                    .collect()
            };
            writeln!(out, "{}", format_task_list(&rows, now))?;
            Ok(false)
        }

        Commands::Show { id } => {
            let id = resolve_id(session, &id)?;
            if let Some(task) = session.store().get(&id) {
                writeln!(out, "{}", format_task_detail(task))?;
            }
            Ok(false)
        }

        Commands::Toggle { ids } => {
            // Resolve every reference up front so a bad one changes nothing
            let ids = ids
                .iter()
                .map(|reference| resolve_id(session, reference))
                .collect::<Result<Vec<_>, _>>()?;

            for id in ids {
                let task = session.toggle_complete(&id)?;
                let state = if task.completed { "Completed" } else { "Reopened" };
                writeln!(out, "{} {}: {}", state, task.id, task.title)?;
            }
            Ok(true)
        }

        Commands::Edit {
            id,
            title,
            priority,
            no_priority,
            due,
            no_due,
            recurring,
            no_recurring,
            notes,
            no_notes,
            additional_notes,
            drop_note,
            attach,
            detach,
        } => {
            let id = resolve_id(session, &id)?;
            let mut task = session
                .store()
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;

            if let Some(t) = title {
                task.title = t;
            }
            if no_priority {
                task.priority = None;
            } else if let Some(p) = priority {
                task.priority = Some(p);
            }
            if no_due {
                task.due_date = None;
            } else if let Some(d) = due {
                task.due_date = Some(d);
            }
            if no_recurring {
                task.recurring = None;
            } else if let Some(r) = recurring {
                task.recurring = Some(r);
            }
            if no_notes {
                task.notes = None;
            } else if let Some(n) = notes {
                task.notes = Some(n);
            }

            // Removals use the positions shown before this edit
            if let Some(position) = drop_note {
                let index = list_index(position, task.additional_notes.len())?;
                task.additional_notes.remove(index);
            }
            task.additional_notes.extend(additional_notes);

            if let Some(position) = detach {
                let index = list_index(position, task.attachments.len())?;
                task.attachments.remove(index);
            }
            for path in attach {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                task.attachments.push(Attachment::encode(name, &bytes));
            }

            let updated = session.update(&id, task)?;
            writeln!(out, "Updated {}: {}", updated.id, updated.title)?;
            Ok(true)
        }

        Commands::Delete { id, force } => {
            let id = resolve_id(session, &id)?;
            if !force {
                let title = session
                    .store()
                    .get(&id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                let question = format!("Delete '{}'? [y/N] ", title);
                write!(out, "{}", question)?;
                out.flush()?;
                if !confirm(&question)? {
                    writeln!(out, "Cancelled.")?;
                    return Ok(false);
                }
            }

            let task = session.delete(&id)?;
            writeln!(out, "Deleted {}: {}", task.id, task.title)?;
            Ok(true)
        }

        Commands::Move { from, to } => {
            let len = session.tasks().len();
            let from_index = from
                .checked_sub(1)
                .ok_or(StoreError::IndexOutOfRange { index: from, len })?;
            let to_index = to
                .checked_sub(1)
                .ok_or(StoreError::IndexOutOfRange { index: to, len })?;

            session.reorder(from_index, to_index)?;
            writeln!(out, "Moved task {} to {}", from, to)?;
            Ok(true)
        }

        Commands::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let count = session.import_text(&content);
            if count == 0 {
                writeln!(out, "No tasks found in {}", file.display())?;
                return Ok(false);
            }
            writeln!(out, "Imported {} task(s)", count)?;
            Ok(true)
        }

        Commands::Export { file } => {
            let content = serialize_export(session.tasks());
            match file {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    writeln!(
                        out,
                        "Exported {} task(s) to {}",
                        session.tasks().len(),
                        path.display()
                    )?;
                }
                None => write!(out, "{}", content)?,
            }
            Ok(false)
        }

        Commands::Share { id } => match id {
            Some(reference) => {
                let id = resolve_id(session, &reference)?;
                if let Some(task) = session.store().get(&id) {
                    writeln!(out, "{}", share_text(task))?;
                }
                session.mark_shared(&id)?;
                Ok(true)
            }
            None => {
                writeln!(out, "{}", share_list_text(session.tasks()))?;
                Ok(false)
            }
        },

        Commands::Reminders => {
            let upcoming = reminders::upcoming(session.tasks(), Utc::now());
            writeln!(out, "{}", format_reminders(&upcoming))?;
            Ok(false)
        }

        Commands::Undo => {
            if session.undo() {
                writeln!(out, "Undone.")?;
                Ok(true)
            } else {
                writeln!(out, "Nothing to undo.")?;
                Ok(false)
            }
        }

        Commands::Redo => {
            if session.redo() {
                writeln!(out, "Redone.")?;
                Ok(true)
            } else {
                writeln!(out, "Nothing to redo.")?;
                Ok(false)
            }
        }

        Commands::History => {
            writeln!(out, "{}", format_history(session.history()))?;
            Ok(false)
        }

        Commands::Shell => bail!("Already in a shell"),

        Commands::Config { .. } => bail!("Run config outside the shell"),
    }
}

/// Convert a 1-based position into an index into a list of `len` items
fn list_index(position: usize, len: usize) -> Result<usize, StoreError> {
    position
        .checked_sub(1)
        .filter(|&i| i < len)
        .ok_or(StoreError::IndexOutOfRange {
            index: position,
            len,
        })
}

/// Show the settings stored at `path`, applying and saving any changes first
pub fn update_config(
    path: &Path,
    max_history: Option<usize>,
    unbounded: bool,
    restore_position: Option<bool>,
    out: &mut dyn Write,
) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    let before = config.clone();

    if unbounded {
        config.max_history = None;
    } else if let Some(max) = max_history {
        if max == 0 {
            bail!("max-history must be at least 1");
        }
        config.max_history = Some(max);
    }
    if let Some(restore) = restore_position {
        config.restore_deleted_position = restore;
    }

    if config != before {
        config.save_to(path)?;
        log::info!("Saved settings to {}", path.display());
    }

    writeln!(
        out,
        "max-history: {}",
        config
            .max_history
            .map_or_else(|| "unbounded".to_string(), |m| m.to_string())
    )?;
    writeln!(
        out,
        "restore-deleted-position: {}",
        config.restore_deleted_position
    )?;
    Ok(config)
}

/// Read commands line by line until EOF or `exit`, saving after every change
pub fn run_shell<R, W, S>(
    session: &mut Session,
    store: &mut S,
    mut input: R,
    mut out: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: KeyValueStore + ?Sized,
{
    let mut line = String::new();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        let bytes_read = input.read_line(&mut line)?;

        if bytes_read == 0 {
            // EOF
            writeln!(out)?;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" {
            break;
        }

        let args = match split_line(trimmed) {
            Ok(args) => args,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` and `--help` as well as real mistakes
                write!(out, "{}", e)?;
                continue;
            }
        };

        let mut confirm = |_: &str| -> std::io::Result<bool> {
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            Ok(answer.trim().eq_ignore_ascii_case("y"))
        };

        match execute(session, command, &mut out, &mut confirm) {
            Ok(true) => save_tasks(store, session.tasks())?,
            Ok(false) => {}
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }

    Ok(())
}
