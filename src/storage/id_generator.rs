//! Timestamp-based ID generation for tasks

use crate::models::Task;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Generates opaque task ids from the wall clock
pub struct IdGenerator;

impl IdGenerator {
    /// Next id for a single new task that does not collide with `existing`
    pub fn next_id(existing: &[Task]) -> String {
        Self::next_id_at(Utc::now(), existing)
    }

    /// Same as [`IdGenerator::next_id`] with an explicit clock reading
    pub fn next_id_at(now: DateTime<Utc>, existing: &[Task]) -> String {
        let taken = Self::taken(existing);
        let mut millis = now.timestamp_millis();
        while taken.contains(millis.to_string().as_str()) {
            millis += 1;
        }
        millis.to_string()
    }

    /// `count` ids for a batch created at the same instant, such as an import.
    ///
    /// Ids are the timestamp followed by the position in the batch, skipping
    /// any that already exist.
    pub fn batch_at(now: DateTime<Utc>, count: usize, existing: &[Task]) -> Vec<String> {
        let taken = Self::taken(existing);
        let base = now.timestamp_millis();
        let mut ids = Vec::with_capacity(count);
        let mut suffix = 0usize;

        while ids.len() < count {
            let id = format!("{}{}", base, suffix);
            suffix += 1;
            if !taken.contains(id.as_str()) {
                ids.push(id);
            }
        }

        ids
    }

    fn taken(existing: &[Task]) -> HashSet<&str> {
        existing.iter().map(|t| t.id.as_str()).collect()
    }
}
