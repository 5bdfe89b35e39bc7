// Parsing of interactive session commands

use crate::filter::{ParseFilterError, StatusFilter};

/// A single user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw text, untrimmed; the store decides whether it is blank
    Add(String),
    /// 1-based position as shown in the listing
    Toggle(usize),
    Delete(usize),
    List(StatusFilter),
    ClearCompleted,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{verb}' needs a task number")]
    MissingPosition { verb: String },

    #[error("'{0}' is not a task number (positions start at 1)")]
    InvalidPosition(String),

    #[error(transparent)]
    Filter(#[from] ParseFilterError),
}

pub const HELP: &str = "\
Commands:
  add <title>          add a task (alias: a)
  toggle <n>           mark task n done / not done (aliases: t, done)
  delete <n>           remove task n (aliases: rm, d)
  list [all|active|done]
                       show tasks (alias: ls)
  clear-completed      remove every completed task
  export               print the list as JSON
  help                 show this message (alias: ?)
  quit                 end the session (aliases: exit, q)";

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest),
            None => (line, ""),
        };
        let verb_lower = verb.to_ascii_lowercase();

        let command = match verb_lower.as_str() {
            "add" | "a" => Command::Add(rest.to_string()),
            "toggle" | "t" | "done" => Command::Toggle(parse_position(&verb_lower, rest)?),
            "delete" | "rm" | "d" => Command::Delete(parse_position(&verb_lower, rest)?),
            "list" | "ls" => {
                if rest.trim().is_empty() {
                    Command::List(StatusFilter::All)
                } else {
                    Command::List(rest.parse()?)
                }
            }
            "clear-completed" => Command::ClearCompleted,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_position(verb: &str, rest: &str) -> Result<usize, CommandError> {
    let arg = rest.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingPosition { verb: verb.to_string() });
    }

    match arg.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(CommandError::InvalidPosition(arg.to_string())),
    }
}
