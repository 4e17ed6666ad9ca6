//! Task records and field validation.
//!
//! Tasks are plain records owned by the store: integer ids are assigned by
//! SQLite on insert and titles are unique across all tasks. Partial updates
//! use [`TaskPatch`], where a field is applied iff it is `Some` -- an
//! explicitly supplied empty description clears it, an absent field never
//! changes anything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum title length in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 300;

/// Task status enumeration.
///
/// `Done` is not terminal -- updates may move a task back to any status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has not been started yet (initial status)
    Pending,
    /// Task is currently being worked on
    InProgress,
    /// Task is finished
    Done,
}

impl TaskStatus {
    /// Database / wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    /// Accepts the wire form plus lowercase and dashed CLI spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            _ => Err(ValidationError::UnknownStatus(s.to_string())),
        }
    }
}

/// Parse task status from its database string, defaulting to `Pending`.
pub(crate) fn parse_status(status_str: &str) -> TaskStatus {
    match status_str {
        "IN_PROGRESS" => TaskStatus::InProgress,
        "DONE" => TaskStatus::Done,
        _ => TaskStatus::Pending,
    }
}

/// A tracked task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned id, unique and ascending.
    pub id: i64,
    /// Unique title, 3-100 characters.
    pub title: String,
    /// Free-form description, up to 300 characters. Empty allowed.
    pub description: String,
    pub status: TaskStatus,
}

/// Fields for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// Convenience constructor with an empty description and `Pending` status.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
        }
    }
}

/// Partial update for a task. `Some` fields overwrite, `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Validate a title against the length bounds.
pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len < TITLE_MIN || len > TITLE_MAX {
        return Err(ValidationError::TitleLength {
            min: TITLE_MIN,
            max: TITLE_MAX,
            len,
        });
    }
    Ok(())
}

/// Validate a description against the length bound.
pub(crate) fn validate_description(description: &str) -> Result<(), ValidationError> {
    let len = description.chars().count();
    if len > DESCRIPTION_MAX {
        return Err(ValidationError::DescriptionLength {
            max: DESCRIPTION_MAX,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(parsed, TaskStatus::Pending);
    }

    #[test]
    fn status_from_str_accepts_cli_spellings() {
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!(
            "in-progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("started".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn title_length_bounds() {
        assert!(validate_title("ab").is_err());
        assert!(validate_title("abc").is_ok());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // Three multibyte characters are within bounds even at > 3 bytes.
        assert!(validate_title("日本語").is_ok());
    }

    #[test]
    fn description_allows_empty() {
        assert!(validate_description("").is_ok());
        assert!(validate_description(&"x".repeat(300)).is_ok());
        assert!(validate_description(&"x".repeat(301)).is_err());
    }
}
