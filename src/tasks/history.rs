//! Linear undo/redo history over the task list
//!
//! The history is a log of [`Action`]s plus a cursor at the last applied one.
//! Undo and redo never touch a store directly: they take the current list
//! and hand back the list the caller should adopt.
//!
//! Sharing is not an action, so the `shared` flag of a task still in the
//! current list survives undo and redo of any action.

use crate::models::{Action, Task};
use std::collections::VecDeque;

/// Where an undone delete puts the task back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteUndo {
    /// Append to the end of the list. Compatible with lists saved by earlier
    /// versions, but undo/redo/undo of a delete does not return to the same
    /// order.
    #[default]
    Append,
    /// Reinsert at the position the task held before it was deleted
    RestorePosition,
}

/// Action log with a cursor
#[derive(Debug, Default)]
pub struct History {
    actions: VecDeque<Action>,
    /// Number of actions currently applied; the cursor is `applied - 1`
    applied: usize,
    max_len: Option<usize>,
    delete_undo: DeleteUndo,
}

impl History {
    /// Create an empty, unbounded history
    pub fn new() -> Self {
        History::default()
    }

    /// Keep at most `max_len` actions, dropping the oldest first
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len.max(1));
        self
    }

    pub fn with_delete_undo(mut self, mode: DeleteUndo) -> Self {
        self.delete_undo = mode;
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of the last applied action, `None` when nothing is applied
    pub fn current_index(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.actions.len()
    }

    /// Recorded actions, oldest first
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Forget every recorded action
    pub fn clear(&mut self) {
        self.actions.clear();
        self.applied = 0;
    }

    /// Record a freshly applied action, discarding anything past the cursor
    pub fn record(&mut self, action: Action) {
        if self.can_redo() {
            log::debug!(
                "discarding {} redoable action(s)",
                self.actions.len() - self.applied
            );
        }
        self.actions.truncate(self.applied);
        self.actions.push_back(action);
        self.applied += 1;

        if let Some(max) = self.max_len {
            while self.actions.len() > max {
                self.actions.pop_front();
                self.applied -= 1;
            }
        }
    }

    /// Step the cursor back, returning the list with the last applied action
    /// reverted, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &[Task]) -> Option<Vec<Task>> {
        let index = self.current_index()?;
        let action = &self.actions[index];
        log::debug!("undo {}", action);

        let tasks = revert(action, current, self.delete_undo);
        self.applied -= 1;
        Some(keep_shared(tasks, current))
    }

    /// Step the cursor forward, returning the list with the next action
    /// applied again, or `None` when there is nothing to redo.
    pub fn redo(&mut self, current: &[Task]) -> Option<Vec<Task>> {
        let action = self.actions.get(self.applied)?;
        log::debug!("redo {}", action);

        let tasks = replay(action, current);
        self.applied += 1;
        Some(keep_shared(tasks, current))
    }
}

fn revert(action: &Action, current: &[Task], delete_undo: DeleteUndo) -> Vec<Task> {
    match action {
        Action::Add { task } => without(current, &task.id),
        Action::Delete { task, index } => {
            let mut tasks = current.to_vec();
            match delete_undo {
                DeleteUndo::Append => tasks.push(task.clone()),
                DeleteUndo::RestorePosition => {
                    let at = (*index).min(tasks.len());
                    tasks.insert(at, task.clone());
                }
            }
            tasks
        }
        Action::Update { before, after } => replaced(current, &after.id, before),
        Action::Reorder { snapshot, .. } => snapshot.clone(),
        Action::Import { previous, .. } => previous.clone(),
    }
}

fn replay(action: &Action, current: &[Task]) -> Vec<Task> {
    match action {
        Action::Add { task } => {
            let mut tasks = current.to_vec();
            tasks.push(task.clone());
            tasks
        }
        Action::Delete { task, .. } => without(current, &task.id),
        Action::Update { after, .. } => replaced(current, &after.id, after),
        Action::Reorder { from, to, .. } => {
            let mut tasks = current.to_vec();
            if *from < tasks.len() && *to < tasks.len() {
                let task = tasks.remove(*from);
                tasks.insert(*to, task);
            } else {
                log::warn!(
                    "cannot redo move {} -> {} on {} task(s), leaving list unchanged",
                    from,
                    to,
                    tasks.len()
                );
            }
            tasks
        }
        Action::Import { imported, previous } => {
            previous.iter().chain(imported.iter()).cloned().collect()
        }
    }
}

fn keep_shared(mut tasks: Vec<Task>, current: &[Task]) -> Vec<Task> {
    for task in &mut tasks {
        if let Some(live) = current.iter().find(|t| t.id == task.id)
            && live.shared.is_some()
        {
            task.shared = live.shared;
        }
    }
    tasks
}

fn without(current: &[Task], id: &str) -> Vec<Task> {
    current.iter().filter(|t| t.id != id).cloned().collect()
}

fn replaced(current: &[Task], id: &str, with: &Task) -> Vec<Task> {
    current
        .iter()
        .map(|t| if t.id == id { with.clone() } else { t.clone() })
        .collect()
}
