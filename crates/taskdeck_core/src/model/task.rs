//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and the create/edit payloads.
//! - Validate and normalize user-entered form fields.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank after trimming.
//! - `tags` keep insertion order and contain no duplicates.
//! - `due_date` is an existing calendar day as `YYYY-MM-DD` and `due_time`
//!   is 24h `HH:MM` when set.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static DUE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid due date regex")
});
static DUE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid due time regex"));

/// Stable identifier for one task.
pub type TaskId = Uuid;

/// Task urgency used for ordering pending work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort key where the most urgent priority comes first.
    pub fn urgency_rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    /// Ordered set; first occurrence wins on duplicates.
    pub tags: Vec<String>,
    pub completed: bool,
    pub is_selected: bool,
}

impl Task {
    /// Builds a new task from form input with a generated ID.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `InvalidDueDate` / `InvalidDueTime` for malformed schedule fields.
    pub fn from_draft(draft: &TaskDraft) -> Result<Self, ValidationError> {
        Self::from_draft_with_id(Uuid::new_v4(), draft)
    }

    /// Same as [`Task::from_draft`] with a caller-provided ID.
    pub fn from_draft_with_id(id: TaskId, draft: &TaskDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            title: normalize_title(&draft.title)?,
            description: draft.description.trim().to_string(),
            category: draft.category.trim().to_string(),
            priority: draft.priority,
            due_date: normalize_due_date(&draft.due_date)?,
            due_time: normalize_due_time(&draft.due_time)?,
            tags: normalize_tags(&draft.tags),
            completed: false,
            is_selected: false,
        })
    }

    /// Returns a copy of this task with the patch applied.
    ///
    /// `completed`, `is_selected` and `id` are never touched by a patch.
    pub fn patched(&self, patch: &TaskPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = normalize_title(title)?;
        }
        if let Some(description) = &patch.description {
            next.description = description.trim().to_string();
        }
        if let Some(category) = &patch.category {
            next.category = category.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(due_date) = &patch.due_date {
            next.due_date = normalize_due_date(due_date)?;
        }
        if let Some(due_time) = &patch.due_time {
            next.due_time = normalize_due_time(due_time)?;
        }
        if let Some(tags) = &patch.tags {
            next.tags = normalize_tags(tags);
        }
        Ok(next)
    }
}

/// Create-task form fields.
///
/// Schedule fields hold raw text; empty text means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: String,
    pub due_time: String,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Draft with only a title, everything else defaulted.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Edit-fields payload. `None` keeps the current value; an empty due date or
/// time clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Trims tags, drops blanks and keeps the first occurrence of duplicates.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || normalized.iter().any(|seen| seen == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

fn normalize_due_date(value: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let Some(parts) = DUE_DATE_RE.captures(trimmed) else {
        return Err(ValidationError::InvalidDueDate(trimmed.to_string()));
    };
    let year: u32 = parts[1].parse().unwrap_or_default();
    let month: u32 = parts[2].parse().unwrap_or_default();
    let day: u32 = parts[3].parse().unwrap_or_default();
    if day > days_in_month(year, month) {
        return Err(ValidationError::NonexistentDueDate(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_string()))
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn normalize_due_time(value: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !DUE_TIME_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidDueTime(trimmed.to_string()));
    }
    Ok(Some(trimmed.to_string()))
}
