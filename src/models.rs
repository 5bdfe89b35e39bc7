// Data models for TaskList

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do item
///
/// `title` and `created_at` are fixed at construction; only `completed`
/// changes over the lifetime of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create an open task stamped with the current time
    ///
    /// The caller is responsible for passing an already-trimmed, non-empty
    /// title; `TaskListStore::add` is the only place tasks are built.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Creation date in local time using a `chrono` format string
    ///
    /// A format chrono cannot render falls back to `DEFAULT_DATE_FORMAT`.
    pub fn created_date(&self, format: &str) -> String {
        let local = self.created_at.with_timezone(&Local);
        let mut out = String::new();
        if write!(out, "{}", local.format(format)).is_err() {
            out = local.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
