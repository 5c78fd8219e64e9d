//! Store construction settings.
//!
//! # Responsibility
//! - Hold the static catalog and selector cache sizing used to build a store.
//! - Report configuration problems before any store exists.
//!
//! # Invariants
//! - `memo_capacity` is always at least 1 once read through
//!   [`StoreConfig::effective_memo_capacity`].

pub mod catalog;

pub use catalog::{validate_sections, CatalogConfig};

use crate::model::validation::ValidationError;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Default number of memoized input sets kept per selector.
pub const DEFAULT_MEMO_CAPACITY: usize = 1;

/// Settings used by [`crate::AppStore::new`] and [`crate::Selectors::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// LRU size of every selector memo.
    pub memo_capacity: usize,
    /// Initial more-menu content.
    pub catalog: CatalogConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            catalog: CatalogConfig::builtin(),
        }
    }
}

impl StoreConfig {
    /// Builds a config around a custom catalog after validating it.
    pub fn with_catalog(catalog: CatalogConfig) -> Result<Self, ConfigError> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            ..Self::default()
        })
    }

    /// Memo capacity clamped to at least one entry.
    pub fn effective_memo_capacity(&self) -> usize {
        self.memo_capacity.max(1)
    }
}

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Catalog file cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Catalog document does not match the expected shape.
    Json(serde_json::Error),
    /// A section or item breaks a catalog rule shared with section hydration.
    InvalidSection(ValidationError),
    EmptyQuickActionId,
    DuplicateQuickActionId(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid catalog json: {err}"),
            Self::InvalidSection(err) => write!(f, "invalid catalog section: {err}"),
            Self::EmptyQuickActionId => write!(f, "quick action id must not be empty"),
            Self::DuplicateQuickActionId(action_id) => {
                write!(f, "quick action id is declared twice: `{action_id}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidSection(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidSection(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
