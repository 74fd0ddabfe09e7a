//! Task list with undo/redo: every mutation goes through the store and is
//! recorded in the history.

use crate::models::{Action, Task, parse_import};
use crate::storage::IdGenerator;
use crate::tasks::history::History;
use crate::tasks::store::{StoreError, TaskStore};
use chrono::Utc;

/// An editing session over one task list
#[derive(Debug, Default)]
pub struct Session {
    store: TaskStore,
    history: History,
}

impl Session {
    pub fn new(tasks: Vec<Task>, history: History) -> Self {
        Session {
            store: TaskStore::from_tasks(tasks),
            history,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Add a task at the end of the list
    pub fn add(&mut self, task: Task) -> Result<&Task, StoreError> {
        self.store.add(task.clone())?;
        self.history.record(Action::Add { task });
        self.last()
    }

    /// Replace a task, keeping its position
    pub fn update(&mut self, id: &str, task: Task) -> Result<&Task, StoreError> {
        let before = self.store.update(id, task)?;
        let after = self.get(id)?.clone();
        self.history.record(Action::Update { before, after });
        self.get(id)
    }

    /// Flip a task between open and completed
    pub fn toggle_complete(&mut self, id: &str) -> Result<&Task, StoreError> {
        let (before, after) = self.store.toggle_complete(id)?;
        self.history.record(Action::Update { before, after });
        self.get(id)
    }

    /// Remove a task, returning it
    pub fn delete(&mut self, id: &str) -> Result<Task, StoreError> {
        let (index, task) = self.store.delete(id)?;
        self.history.record(Action::Delete {
            task: task.clone(),
            index,
        });
        Ok(task)
    }

    /// Move a task within the stored order
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let snapshot = self.store.tasks().to_vec();
        self.store.reorder(from, to)?;
        self.history.record(Action::Reorder { from, to, snapshot });
        Ok(())
    }

    /// Append a batch of tasks as one undoable step
    pub fn import(&mut self, imported: Vec<Task>) {
        let previous = self.store.tasks().to_vec();
        self.store.import_bulk(imported.iter().cloned());
        self.history.record(Action::Import { imported, previous });
    }

    /// Parse an import file, give each record a fresh id and import them.
    ///
    /// Returns the number of tasks imported. Nothing is recorded when the
    /// file holds no records.
    pub fn import_text(&mut self, content: &str) -> usize {
        let records = parse_import(content);
        if records.is_empty() {
            return 0;
        }

        let now = Utc::now();
        let ids = IdGenerator::batch_at(now, records.len(), self.store.tasks());
        let imported: Vec<Task> = records
            .into_iter()
            .zip(ids)
            .map(|(record, id)| record.into_task(id, now))
            .collect();

        let count = imported.len();
        self.import(imported);
        count
    }

    /// Record that a task was shared. Not an undoable step; undo and redo of
    /// other actions leave the flag set.
    pub fn mark_shared(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.mark_shared(id)
    }

    /// Revert the last applied action. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.store.tasks()) {
            Some(tasks) => {
                self.store.replace(tasks);
                true
            }
            None => false,
        }
    }

    /// Re-apply the next undone action. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.store.tasks()) {
            Some(tasks) => {
                self.store.replace(tasks);
                true
            }
            None => false,
        }
    }

    /// Consume the session, keeping the task list
    pub fn into_tasks(self) -> Vec<Task> {
        self.store.tasks().to_vec()
    }

    fn get(&self, id: &str) -> Result<&Task, StoreError> {
        self.store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn last(&self) -> Result<&Task, StoreError> {
        self.store
            .tasks()
            .last()
            .ok_or_else(|| StoreError::NotFound("<empty list>".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::history::DeleteUndo;

    fn titles(session: &Session) -> Vec<&str> {
        session.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    fn ids(session: &Session) -> Vec<&str> {
        session.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    fn session_with(items: &[(&str, &str)]) -> Session {
        let mut session = Session::default();
        for (id, title) in items {
            session.add(Task::new(*id, *title)).unwrap();
        }
        session
    }

    #[test]
    fn test_add_delete_undo_trace() {
        let mut session = session_with(&[("1", "A"), ("2", "B")]);
        session.delete("1").unwrap();
        assert_eq!(titles(&session), vec!["B"]);

        assert!(session.undo());
        assert_eq!(ids(&session), vec!["2", "1"]);

        assert!(session.undo());
        assert_eq!(ids(&session), vec!["1"]);

        assert!(session.undo());
        assert!(session.tasks().is_empty());
        assert!(!session.undo());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_delete_undo_redo_undo_changes_order() {
        let mut session = session_with(&[("1", "A"), ("2", "B"), ("3", "C")]);
        session.delete("1").unwrap();
        session.undo();
        session.redo();
        session.undo();
        assert_eq!(ids(&session), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_delete_undo_restore_position_mode() {
        let history = History::new().with_delete_undo(DeleteUndo::RestorePosition);
        let mut session = Session::new(Vec::new(), history);
        session.add(Task::new("1", "A")).unwrap();
        session.add(Task::new("2", "B")).unwrap();
        session.delete("1").unwrap();

        session.undo();
        assert_eq!(ids(&session), vec!["1", "2"]);
    }

    #[test]
    fn test_failed_mutation_records_nothing() {
        let mut session = session_with(&[("1", "A")]);
        assert!(session.add(Task::new("1", "dup")).is_err());
        assert!(session.delete("9").is_err());
        assert!(session.reorder(0, 3).is_err());
        assert!(session.update("9", Task::new("9", "X")).is_err());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_update_undo_redo() {
        let mut session = session_with(&[("1", "A"), ("2", "B")]);
        session.update("1", Task::new("1", "A2")).unwrap();
        assert_eq!(titles(&session), vec!["A2", "B"]);

        session.undo();
        assert_eq!(titles(&session), vec!["A", "B"]);
        session.redo();
        assert_eq!(titles(&session), vec!["A2", "B"]);
    }

    #[test]
    fn test_toggle_undo() {
        let mut session = session_with(&[("1", "A")]);
        assert!(session.toggle_complete("1").unwrap().completed);
        session.undo();
        assert!(!session.tasks()[0].completed);
        session.redo();
        assert!(session.tasks()[0].completed);
    }

    #[test]
    fn test_reorder_undo_restores_exact_list() {
        let mut session = session_with(&[("1", "A"), ("2", "B"), ("3", "C"), ("4", "D")]);
        let before = session.tasks().to_vec();

        for (from, to) in [(0, 3), (3, 0), (1, 2), (2, 2)] {
            session.reorder(from, to).unwrap();
            let after = session.tasks().to_vec();

            session.undo();
            assert_eq!(session.tasks(), before.as_slice());

            session.redo();
            assert_eq!(session.tasks(), after.as_slice());

            session.undo();
        }
    }

    #[test]
    fn test_import_text_and_undo() {
        let mut session = session_with(&[("1", "A")]);
        let before = session.tasks().to_vec();

        let count = session.import_text("T1\nN1\n---\nT2\nN2\n---\nT3\nN3\n---\n");
        assert_eq!(count, 3);
        assert_eq!(titles(&session), vec!["A", "T1", "T2", "T3"]);
        assert_eq!(session.tasks()[2].notes.as_deref(), Some("N2"));

        let mut seen: Vec<&str> = ids(&session);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);

        let after = session.tasks().to_vec();
        session.undo();
        assert_eq!(session.tasks(), before.as_slice());

        session.redo();
        assert_eq!(session.tasks(), after.as_slice());
    }

    #[test]
    fn test_import_text_empty_records_nothing() {
        let mut session = session_with(&[("1", "A")]);
        assert_eq!(session.import_text("\n---\n"), 0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_new_action_after_undo_drops_redo() {
        let mut session = session_with(&[("1", "A"), ("2", "B")]);
        session.undo();
        assert!(session.can_redo());

        session.add(Task::new("3", "C")).unwrap();
        assert!(!session.can_redo());
        assert!(!session.redo());
        assert_eq!(ids(&session), vec!["1", "3"]);
    }

    #[test]
    fn test_mark_shared_is_not_undoable() {
        let mut session = session_with(&[("1", "A")]);
        session.mark_shared("1").unwrap();
        assert_eq!(session.history().len(), 1);
        assert!(session.tasks()[0].was_shared());
    }

    #[test]
    fn test_undo_update_keeps_shared_flag() {
        let mut session = session_with(&[("1", "A")]);
        let mut edited = session.tasks()[0].clone();
        edited.title = "A2".to_string();
        session.update("1", edited).unwrap();
        session.mark_shared("1").unwrap();

        assert!(session.undo());
        assert_eq!(titles(&session), vec!["A"]);
        assert!(session.tasks()[0].was_shared());

        assert!(session.redo());
        assert_eq!(titles(&session), vec!["A2"]);
        assert!(session.tasks()[0].was_shared());
    }
}
