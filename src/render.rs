// Text projection of the task list

use crate::filter::StatusFilter;
use crate::models::{DEFAULT_DATE_FORMAT, Task};
use crate::store::{Counts, TaskListStore};
use colored::Colorize;

pub const EMPTY_STATE: &str = "No tasks yet. Add one with \"add <title>\".";

/// Presentation knobs, resolved from config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub date_format: String,
    pub color: bool,
    pub show_summary: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            color: true,
            show_summary: true,
        }
    }
}

/// One row: 1-based position, status marker, title, creation date
pub fn render_task(position: usize, task: &Task, opts: &RenderOptions) -> String {
    let date = task.created_date(&opts.date_format);
    let marker = if task.completed { "[x]" } else { "[ ]" };

    if !opts.color {
        return format!("{:>3}. {} {}  ({})", position, marker, task.title, date);
    }

    let (marker, title) = if task.completed {
        (
            marker.green().to_string(),
            task.title.dimmed().strikethrough().to_string(),
        )
    } else {
        (marker.normal().to_string(), task.title.normal().to_string())
    };
    format!("{:>3}. {} {}  ({})", position, marker, title, date.dimmed())
}

pub fn render_summary(counts: Counts) -> String {
    let noun = if counts.total == 1 { "task" } else { "tasks" };
    format!("{} {}, {} completed", counts.total, noun, counts.completed)
}

/// Render the whole list, or the empty-state line when nothing matches
///
/// Positions are always store positions, so a filtered view may skip numbers.
pub fn render_list(store: &TaskListStore, filter: StatusFilter, opts: &RenderOptions) -> String {
    if store.is_empty() {
        return format!("{}\n", EMPTY_STATE);
    }

    let mut out = String::new();
    for (index, task) in store.filtered(filter) {
        out.push_str(&render_task(index + 1, task, opts));
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str(&format!("No {} tasks.\n", filter));
    }

    if opts.show_summary {
        out.push_str(&render_summary(store.counts()));
        out.push('\n');
    }

    out
}
