//! Validation failures surfaced by mutation intents.
//!
//! Rejected intents record the rendered message in the slice `error` field;
//! canonical data is left untouched.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for intent payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Due date is not `YYYY-MM-DD`.
    InvalidDueDate(String),
    /// Due time is not `HH:MM`.
    InvalidDueTime(String),
    /// Due date is well formed but not a calendar day.
    NonexistentDueDate(String),
    /// Section title is empty after trimming.
    EmptySectionTitle,
    /// Two sections share one title.
    DuplicateSection(String),
    EmptyItemId {
        section: String,
    },
    /// Two items of one section share an id.
    DuplicateItemId {
        section: String,
        item_id: String,
    },
    /// External-link item declared without a url.
    MissingUrl {
        section: String,
        item_id: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::InvalidDueDate(value) => {
                write!(f, "due date must be YYYY-MM-DD, got `{value}`")
            }
            Self::InvalidDueTime(value) => write!(f, "due time must be HH:MM, got `{value}`"),
            Self::NonexistentDueDate(value) => {
                write!(f, "due date `{value}` is not a calendar day")
            }
            Self::EmptySectionTitle => write!(f, "section title must not be empty"),
            Self::DuplicateSection(title) => write!(f, "duplicate section title: `{title}`"),
            Self::EmptyItemId { section } => {
                write!(f, "item id must not be empty in section `{section}`")
            }
            Self::DuplicateItemId { section, item_id } => {
                write!(f, "item id `{item_id}` is declared twice in section `{section}`")
            }
            Self::MissingUrl { section, item_id } => write!(
                f,
                "external link item `{item_id}` in section `{section}` requires a url"
            ),
        }
    }
}

impl Error for ValidationError {}
