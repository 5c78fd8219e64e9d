//! "More" menu catalog model.
//!
//! # Responsibility
//! - Define sections, items and quick actions shown by the more screen.
//! - Provide the case-insensitive search predicate used by filtering.
//!
//! # Invariants
//! - Section titles are unique among sections.
//! - Item ids are unique within their section.

use serde::{Deserialize, Serialize};

/// Title of the productivity section.
pub const PRODUCTIVITY_SECTION: &str = "Productivity";
/// Title of the tools section.
pub const TOOLS_SECTION: &str = "Tools";
/// Title of the community section.
pub const COMMUNITY_SECTION: &str = "Community";
/// Title of the support section.
pub const SUPPORT_SECTION: &str = "Support";
/// Title of the account section.
pub const ACCOUNT_SECTION: &str = "Account";

/// What tapping a menu item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAction {
    /// In-app route.
    Navigate,
    /// Opens `url` outside the app.
    ExternalLink,
    /// Irreversible account action; UI must confirm first.
    DestructiveAction,
}

impl ItemAction {
    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::ExternalLink => "external_link",
            Self::DestructiveAction => "destructive_action",
        }
    }
}

/// One row inside a [`MoreSection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreItem {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub action: ItemAction,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub destructive: bool,
}

/// Titled group of menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreSection {
    pub title: String,
    pub items: Vec<MoreItem>,
}

impl MoreSection {
    /// Returns whether the section title or any item title contains
    /// `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .items
                .iter()
                .any(|item| item.title.to_lowercase().contains(needle_lower))
    }
}

/// Shortcut button on the more screen header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub color: String,
    /// Key resolved by the presentation layer to a callback.
    pub handler: String,
}

/// Keeps sections whose title or item titles contain `query`,
/// case-insensitively. Whitespace is part of the needle.
///
/// Returns `None` only for the empty query, meaning "no filter".
pub fn filter_sections(sections: &[MoreSection], query: &str) -> Option<Vec<MoreSection>> {
    if query.is_empty() {
        return None;
    }
    let needle = query.to_lowercase();
    Some(
        sections
            .iter()
            .filter(|section| section.matches(&needle))
            .cloned()
            .collect(),
    )
}
