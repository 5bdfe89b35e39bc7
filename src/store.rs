// In-memory task list store

use crate::error::StoreError;
use crate::filter::StatusFilter;
use crate::models::Task;
use tracing::debug;

/// Ordered, session-scoped collection of tasks
///
/// Tasks are addressed by their 0-based position in insertion order.
/// Deleting a task shifts every later task down by one, so an index is
/// only meaningful relative to the most recent mutation.
#[derive(Debug, Clone, Default)]
pub struct TaskListStore {
    tasks: Vec<Task>,
}

/// Totals for the summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl TaskListStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a task built from `raw_text`
    ///
    /// The text is trimmed first. Blank input is ignored without error and
    /// leaves the store untouched. Returns the current sequence either way.
    pub fn add(&mut self, raw_text: &str) -> &[Task] {
        let title = raw_text.trim();
        if title.is_empty() {
            debug!("add: ignoring blank input");
            return &self.tasks;
        }

        self.tasks.push(Task::new(title));
        debug!(index = self.tasks.len() - 1, title, "add: appended task");
        &self.tasks
    }

    /// Flip `completed` on the task at `index`
    pub fn toggle(&mut self, index: usize) -> Result<&Task, StoreError> {
        self.check_index(index)?;

        let task = &mut self.tasks[index];
        task.toggle();
        debug!(index, completed = task.completed, "toggle: flipped task");
        Ok(&*task)
    }

    /// Remove and return the task at `index`
    pub fn delete(&mut self, index: usize) -> Result<Task, StoreError> {
        self.check_index(index)?;

        let task = self.tasks.remove(index);
        debug!(index, remaining = self.tasks.len(), "delete: removed task");
        Ok(task)
    }

    /// Remove every completed task, keeping the relative order of the rest
    ///
    /// Returns the number of tasks removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        debug!(removed, "clear_completed: removed completed tasks");
        removed
    }

    // ========================================================================
    // Read-only projection
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Current sequence in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks matching `filter`, paired with their store index
    ///
    /// The index is the one `toggle`/`delete` expect, regardless of how many
    /// tasks the filter hides.
    pub fn filtered(&self, filter: StatusFilter) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
    }

    pub fn counts(&self) -> Counts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        Counts {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}
