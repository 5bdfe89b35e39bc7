// TaskList - Single-session task list with an interactive command loop

pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use command::{Command, CommandError};
pub use config::{Config, Overrides};
pub use error::StoreError;
pub use filter::StatusFilter;
pub use models::Task;
pub use render::RenderOptions;
pub use session::{Mode, Session, SessionError};
pub use store::{Counts, TaskListStore};
