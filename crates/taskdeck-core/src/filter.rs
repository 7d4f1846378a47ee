use std::{fmt, str::FromStr};

use crate::task::Task;
use crate::text_matcher::TextMatcher;

/// Completion-status filter applied before any text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Keep every task.
    #[default]
    All,
    /// Keep tasks that are not completed.
    Active,
    /// Keep completed tasks.
    Completed,
}

impl StatusFilter {
    /// Whether the given task passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// String representation used in CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter token cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("unknown filter: {0} (expected all, active, or completed)")]
pub struct ParseFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(ParseFilterError(other.to_owned())),
        }
    }
}

/// Project the visible subset of tasks for the given filter and search term.
///
/// The status filter is applied first, then the (case-insensitive substring)
/// search on the result. A blank search term filters nothing. Relative order
/// is preserved.
#[must_use]
pub fn visible_tasks(tasks: &[Task], filter: StatusFilter, search: &str) -> Vec<Task> {
    let matcher = TextMatcher::new(search);
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .filter(|task| matcher.as_ref().is_none_or(|m| m.matches(task)))
        .cloned()
        .collect()
}
