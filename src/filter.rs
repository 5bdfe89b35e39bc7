// View filtering over the task list

use crate::models::Task;
use std::str::FromStr;

/// Which tasks a listing shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,    // completed == false
    Completed, // completed == true
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

/// Unrecognised filter word
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}' (expected all, active or done)")]
pub struct ParseFilterError(pub String);

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" | "open" => Ok(StatusFilter::Active),
            "done" | "completed" => Ok(StatusFilter::Completed),
            _ => Err(ParseFilterError(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Active => write!(f, "active"),
            StatusFilter::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let open = Task::new("open");
        let mut done = Task::new("done");
        done.completed = true;

        assert!(StatusFilter::All.matches(&open));
        assert!(StatusFilter::All.matches(&done));
        assert!(StatusFilter::Active.matches(&open));
        assert!(!StatusFilter::Active.matches(&done));
        assert!(!StatusFilter::Completed.matches(&open));
        assert!(StatusFilter::Completed.matches(&done));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("Active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("done".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);
        assert_eq!(" completed ".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);

        let err = "someday".parse::<StatusFilter>().unwrap_err();
        assert_eq!(err, ParseFilterError("someday".to_string()));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(StatusFilter::All.to_string(), "all");
        assert_eq!(StatusFilter::Active.to_string(), "active");
        assert_eq!(StatusFilter::Completed.to_string(), "completed");
    }
}
