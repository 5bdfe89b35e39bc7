// Interactive session: read a command, apply it, re-render

use crate::command::{Command, CommandError, HELP};
use crate::config::Config;
use crate::error::StoreError;
use crate::filter::StatusFilter;
use crate::render::{RenderOptions, render_list};
use crate::store::TaskListStore;
use eyre::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// How input lines reach the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompt before each line is read
    Interactive,
    /// Echo each line after the prompt, so the output reads as a transcript
    Replay,
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub outcome: Outcome,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            outcome: Outcome::Continue,
        }
    }
}

/// Errors reported back to the user; none of them end the session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("no task {position} (list length {len})")]
    NoSuchTask { position: usize, len: usize },

    #[error("failed to export tasks: {0}")]
    Export(#[from] serde_json::Error),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::IndexOutOfRange { index, len } => SessionError::NoSuchTask {
                position: index + 1,
                len,
            },
        }
    }
}

/// One running instance of the task list
///
/// Owns the store exclusively; every command runs to completion before the
/// next line is read.
pub struct Session {
    store: TaskListStore,
    prompt: String,
    render: RenderOptions,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            store: TaskListStore::new(),
            prompt: config.prompt.clone(),
            render: config.render_options(),
        }
    }

    pub fn store(&self) -> &TaskListStore {
        &self.store
    }

    pub fn into_store(self) -> TaskListStore {
        self.store
    }

    /// Apply a parsed command to the store
    ///
    /// Positions in commands are 1-based and converted to store indices here.
    pub fn apply(&mut self, command: Command) -> Result<Reply, SessionError> {
        debug!(?command, "apply: called");

        let reply = match command {
            Command::Add(text) => {
                let before = self.store.len();
                self.store.add(&text);
                if self.store.len() == before {
                    Reply::text("")
                } else {
                    Reply::text(self.render(StatusFilter::All))
                }
            }
            Command::Toggle(position) => {
                let index = self.index_of(position)?;
                self.store.toggle(index)?;
                Reply::text(self.render(StatusFilter::All))
            }
            Command::Delete(position) => {
                let index = self.index_of(position)?;
                self.store.delete(index)?;
                Reply::text(self.render(StatusFilter::All))
            }
            Command::List(filter) => Reply::text(self.render(filter)),
            Command::ClearCompleted => {
                let removed = self.store.clear_completed();
                let noun = if removed == 1 { "task" } else { "tasks" };
                Reply::text(format!(
                    "Removed {} completed {}.\n{}",
                    removed,
                    noun,
                    self.render(StatusFilter::All)
                ))
            }
            Command::Export => {
                let json = serde_json::to_string_pretty(self.store.tasks())?;
                Reply::text(format!("{}\n", json))
            }
            Command::Help => Reply::text(format!("{}\n", HELP)),
            Command::Quit => Reply {
                output: String::new(),
                outcome: Outcome::Quit,
            },
        };

        Ok(reply)
    }

    /// Parse and apply one input line, writing the reply or the error
    pub fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Outcome> {
        let result = match Command::parse(line) {
            Ok(None) => return Ok(Outcome::Continue),
            Ok(Some(command)) => self.apply(command),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(reply) => {
                output.write_all(reply.output.as_bytes())?;
                Ok(reply.outcome)
            }
            Err(err) => {
                warn!(error = %err, "Command rejected");
                writeln!(output, "error: {}", err)?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Drive the session until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W, mode: Mode) -> Result<()> {
        info!(?mode, "Session started");
        output.write_all(self.render(StatusFilter::All).as_bytes())?;

        let mut buf = Vec::new();
        loop {
            if mode == Mode::Interactive {
                write!(output, "{}", self.prompt)?;
                output.flush()?;
            }

            buf.clear();
            let read = input.read_until(b'\n', &mut buf).context("Failed to read command")?;
            if read == 0 {
                break;
            }

            if mode == Mode::Replay {
                writeln!(output, "{}{}", self.prompt, String::from_utf8_lossy(&buf).trim_end())?;
            }

            // A bad line is rejected on its own; the session keeps its tasks
            let Ok(line) = std::str::from_utf8(&buf) else {
                warn!(bytes = buf.len(), "Rejected input that is not valid UTF-8");
                writeln!(output, "error: input is not valid UTF-8")?;
                continue;
            };

            if self.handle_line(line, output)? == Outcome::Quit {
                break;
            }
        }

        output.flush()?;
        info!(tasks = self.store.len(), "Session ended");
        Ok(())
    }

    fn index_of(&self, position: usize) -> Result<usize, SessionError> {
        position.checked_sub(1).ok_or(SessionError::NoSuchTask {
            position,
            len: self.store.len(),
        })
    }

    fn render(&self, filter: StatusFilter) -> String {
        render_list(&self.store, filter, &self.render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EMPTY_STATE;
    use std::io::Cursor;

    fn plain_config() -> Config {
        Config {
            color: false,
            ..Default::default()
        }
    }

    fn run_script(script: &str, mode: Mode) -> (Session, String) {
        let mut session = Session::new(&plain_config());
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out, mode).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_session_starts_with_empty_state() {
        let (session, out) = run_script("", Mode::Interactive);
        assert!(session.store().is_empty());
        assert_eq!(out, format!("{}\n> ", EMPTY_STATE));
    }

    #[test]
    fn test_apply_walkthrough() {
        let mut session = Session::new(&plain_config());

        session.apply(Command::Add("Buy milk".to_string())).unwrap();
        let reply = session.apply(Command::Add("  ".to_string())).unwrap();
        assert_eq!(reply.output, "");
        assert_eq!(session.store().len(), 1);

        session.apply(Command::Toggle(1)).unwrap();
        assert!(session.store().tasks()[0].completed);

        session.apply(Command::Add("Walk dog".to_string())).unwrap();
        session.apply(Command::Delete(1)).unwrap();

        let store = session.into_store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, "Walk dog");
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn test_apply_out_of_range_reports_position() {
        let mut session = Session::new(&plain_config());
        session.apply(Command::Add("only".to_string())).unwrap();

        let err = session.apply(Command::Toggle(2)).unwrap_err();
        assert!(matches!(err, SessionError::NoSuchTask { position: 2, len: 1 }));
        assert_eq!(err.to_string(), "no task 2 (list length 1)");
    }

    #[test]
    fn test_apply_position_zero_is_rejected() {
        let mut session = Session::new(&plain_config());
        session.apply(Command::Add("only".to_string())).unwrap();

        assert!(matches!(
            session.apply(Command::Delete(0)),
            Err(SessionError::NoSuchTask { position: 0, len: 1 })
        ));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_run_reports_errors_and_continues() {
        let script = "add first\ndelete 9\nbogus\nadd second\nquit\nadd never\n";
        let (session, out) = run_script(script, Mode::Interactive);

        assert!(out.contains("error: no task 9 (list length 1)"));
        assert!(out.contains("error: unknown command 'bogus'"));

        let titles: Vec<&str> = session.store().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_run_survives_invalid_utf8_line() {
        let mut session = Session::new(&plain_config());
        let mut out = Vec::new();
        let input: &[u8] = b"add first\nadd caf\xe9\nadd second\n";
        session.run(Cursor::new(input), &mut out, Mode::Interactive).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: input is not valid UTF-8"));

        let titles: Vec<&str> = session.store().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_run_with_unrenderable_date_format() {
        let config = Config {
            date_format: "%Q".to_string(),
            color: false,
            ..Default::default()
        };
        let mut session = Session::new(&config);
        let mut out = Vec::new();
        session
            .run(Cursor::new("add Buy milk\nlist\n"), &mut out, Mode::Replay)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  1. [ ] Buy milk  ("));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn test_run_replay_echoes_commands() {
        let (_, out) = run_script("add Buy milk\nlist active\n", Mode::Replay);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], EMPTY_STATE);
        assert_eq!(lines[1], "> add Buy milk");
        assert!(lines[2].starts_with("  1. [ ] Buy milk"));
        assert_eq!(lines[3], "1 task, 0 completed");
        assert_eq!(lines[4], "> list active");
        assert!(lines[5].starts_with("  1. [ ] Buy milk"));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let (session, out) = run_script("\n   \nadd   \n", Mode::Replay);
        assert!(session.store().is_empty());
        assert!(!out.contains("error"));
    }

    #[test]
    fn test_clear_completed_command() {
        let (session, out) = run_script("add a\nadd b\ndone 1\nclear-completed\n", Mode::Replay);
        assert!(out.contains("Removed 1 completed task."));
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.store().tasks()[0].title, "b");
    }

    #[test]
    fn test_export_is_json() {
        let mut session = Session::new(&plain_config());
        session.apply(Command::Add("Buy milk".to_string())).unwrap();
        session.apply(Command::Toggle(1)).unwrap();

        let reply = session.apply(Command::Export).unwrap();
        let exported: Vec<crate::models::Task> = serde_json::from_str(&reply.output).unwrap();
        assert_eq!(exported, session.store().tasks());
    }

    #[test]
    fn test_quit_outcome() {
        let mut session = Session::new(&plain_config());
        let reply = session.apply(Command::Quit).unwrap();
        assert_eq!(reply.outcome, Outcome::Quit);
        assert!(reply.output.is_empty());
    }
}
