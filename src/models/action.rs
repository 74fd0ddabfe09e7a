//! Reversible task list mutations recorded by the history

use crate::models::task::Task;
use std::fmt;

/// One recorded mutation of the task list.
///
/// Every variant carries enough information to turn the list as it was right
/// after the mutation back into the list right before it, and the other way
/// around. Reorder and Import keep a full copy of the list because neither
/// can be inverted from partial information.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add {
        task: Task,
    },
    Update {
        before: Task,
        after: Task,
    },
    Delete {
        task: Task,
        /// Position the task held before it was removed
        index: usize,
    },
    Reorder {
        from: usize,
        to: usize,
        /// The list before the move
        snapshot: Vec<Task>,
    },
    Import {
        imported: Vec<Task>,
        /// The list before the import
        previous: Vec<Task>,
    },
}

impl Action {
    /// Short label of the action kind
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Update { .. } => "update",
            Action::Delete { .. } => "delete",
            Action::Reorder { .. } => "reorder",
            Action::Import { .. } => "import",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add { task } => write!(f, "add '{}'", task.title),
            Action::Update { before, after } if before.completed != after.completed => {
                let verb = if after.completed { "complete" } else { "reopen" };
                write!(f, "{} '{}'", verb, after.title)
            }
            Action::Update { after, .. } => write!(f, "update '{}'", after.title),
            Action::Delete { task, .. } => write!(f, "delete '{}'", task.title),
            Action::Reorder { from, to, .. } => write!(f, "move {} -> {}", from, to),
            Action::Import { imported, .. } => write!(f, "import {} task(s)", imported.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind() {
        let task = Task::new("1", "A");
        assert_eq!(Action::Add { task: task.clone() }.kind(), "add");
        assert_eq!(
            Action::Delete {
                task: task.clone(),
                index: 0
            }
            .kind(),
            "delete"
        );
        assert_eq!(
            Action::Reorder {
                from: 0,
                to: 1,
                snapshot: vec![task]
            }
            .kind(),
            "reorder"
        );
    }

    #[test]
    fn test_action_display() {
        let before = Task::new("1", "Water plants");
        let after = before.toggled();

        assert_eq!(
            Action::Add {
                task: before.clone()
            }
            .to_string(),
            "add 'Water plants'"
        );
        assert_eq!(
            Action::Update {
                before: before.clone(),
                after: after.clone()
            }
            .to_string(),
            "complete 'Water plants'"
        );
        assert_eq!(
            Action::Update {
                before: after,
                after: before.clone()
            }
            .to_string(),
            "reopen 'Water plants'"
        );
        assert_eq!(
            Action::Import {
                imported: vec![before.clone(), before],
                previous: Vec::new()
            }
            .to_string(),
            "import 2 task(s)"
        );
    }
}
