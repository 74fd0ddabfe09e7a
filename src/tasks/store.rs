//! The ordered task list and its primitive mutations

use crate::models::{Priority, Task};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by task list mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid task: {0}")]
    Validation(String),
    #[error("Task not found: {0}")]
    NotFound(String),
    #[error("Index {index} out of range for {len} task(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Owns the authoritative, ordered task list.
///
/// The order is the user's own arrangement and is never changed by sorted
/// views; see [`TaskStore::display_order`].
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Create a store holding a previously saved list
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Position of a task by id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Append a task to the end of the list
    pub fn add(&mut self, task: Task) -> Result<(), StoreError> {
        if !task.has_title() {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }
        if self.get(&task.id).is_some() {
            return Err(StoreError::Validation(format!(
                "duplicate task id: {}",
                task.id
            )));
        }

        log::debug!("add task {} at {}", task.id, self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Replace the task with the given id in place, returning the old version.
    ///
    /// The creation timestamp of the stored task is kept.
    pub fn update(&mut self, id: &str, mut task: Task) -> Result<Task, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if task.id != id {
            return Err(StoreError::Validation(format!(
                "cannot change task id from {} to {}",
                id, task.id
            )));
        }
        if !task.has_title() {
            return Err(StoreError::Validation("title must not be empty".to_string()));
        }

        task.created_at = self.tasks[index].created_at;
        log::debug!("update task {} at {}", id, index);
        Ok(std::mem::replace(&mut self.tasks[index], task))
    }

    /// Flip the completed flag, returning the task before and after
    pub fn toggle_complete(&mut self, id: &str) -> Result<(Task, Task), StoreError> {
        let current = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let toggled = current.toggled();
        let before = self.update(id, toggled.clone())?;
        Ok((before, toggled))
    }

    /// Remove a task, returning its former position and the task itself
    pub fn delete(&mut self, id: &str) -> Result<(usize, Task), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        log::debug!("delete task {} at {}", id, index);
        Ok((index, self.tasks.remove(index)))
    }

    /// Move the task at `from` so it ends up at `to`.
    ///
    /// `to` indexes the list after the task has been taken out, so this is a
    /// remove-then-insert, not a swap.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.tasks.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        log::debug!("move task {} -> {}", from, to);
        Ok(())
    }

    /// Append imported tasks as they are.
    ///
    /// Ids are not checked against the existing list.
    pub fn import_bulk(&mut self, tasks: impl IntoIterator<Item = Task>) {
        let before = self.tasks.len();
        self.tasks.extend(tasks);
        log::debug!("imported {} task(s)", self.tasks.len() - before);
    }

    /// Adopt a whole new list, such as one produced by undo or redo
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Mark a task as shared at least once
    pub fn mark_shared(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.tasks[index].shared = Some(true);
        Ok(())
    }

    /// The list as it should be shown: open tasks first, then by due date
    /// (undated last), then by priority. Stable, and leaves the list alone.
    pub fn display_order(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by(|a, b| display_cmp(a, b));
        view
    }
}

fn display_cmp(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| Priority::rank(a.priority).cmp(&Priority::rank(b.priority)))
}
