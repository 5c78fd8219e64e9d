//! Static more-menu catalog configuration.
//!
//! # Responsibility
//! - Ship the built-in more sections and quick actions.
//! - Load and validate JSON catalog overrides.
//!
//! # Invariants
//! - A validated catalog has unique section titles, unique item ids per
//!   section and unique quick action ids.
//! - External-link items always carry a url.

use crate::config::ConfigError;
use crate::model::more::{
    ItemAction, MoreItem, MoreSection, QuickAction, ACCOUNT_SECTION, COMMUNITY_SECTION,
    PRODUCTIVITY_SECTION, SUPPORT_SECTION, TOOLS_SECTION,
};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Sections and quick actions populated into the more slice at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub sections: Vec<MoreSection>,
    #[serde(default)]
    pub quick_actions: Vec<QuickAction>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogConfig {
    /// Built-in app menu.
    pub fn builtin() -> Self {
        Self {
            sections: vec![
                MoreSection {
                    title: PRODUCTIVITY_SECTION.to_string(),
                    items: vec![
                        nav("focus_timer", "Focus Timer", "timer"),
                        nav("habits", "Habits", "repeat"),
                        nav("calendar_sync", "Calendar Sync", "calendar"),
                    ],
                },
                MoreSection {
                    title: TOOLS_SECTION.to_string(),
                    items: vec![
                        nav("export_data", "Export Data", "download"),
                        nav("import_tasks", "Import Tasks", "upload"),
                        nav("widgets", "Widgets", "grid"),
                    ],
                },
                MoreSection {
                    title: COMMUNITY_SECTION.to_string(),
                    items: vec![
                        nav("leaderboards", "Leaderboards", "trophy"),
                        nav("invite_friends", "Invite Friends", "user-plus"),
                        link("discord", "Discord", "message-circle", "https://discord.gg/taskdeck"),
                    ],
                },
                MoreSection {
                    title: SUPPORT_SECTION.to_string(),
                    items: vec![
                        link("help_center", "Help Center", "help-circle", "https://help.taskdeck.app"),
                        nav("contact_support", "Contact Support", "mail"),
                        link("rate_app", "Rate the App", "star", "https://taskdeck.app/rate"),
                    ],
                },
                MoreSection {
                    title: ACCOUNT_SECTION.to_string(),
                    items: vec![
                        nav("settings", "Settings", "settings"),
                        nav("privacy", "Privacy", "shield"),
                        destructive("sign_out", "Sign Out", "log-out"),
                        destructive("delete_account", "Delete Account", "trash"),
                    ],
                },
            ],
            quick_actions: vec![
                quick("new_task", "New Task", "plus", "#4F46E5", "open_create_task"),
                quick("start_focus", "Start Focus", "timer", "#059669", "start_focus_session"),
                quick("view_stats", "View Stats", "bar-chart", "#D97706", "open_stats"),
                quick("invite", "Invite", "user-plus", "#DB2777", "open_invite"),
            ],
        }
    }

    /// Parses and validates a JSON catalog.
    ///
    /// # Errors
    /// - `ConfigError::Json` when the document does not match the schema.
    /// - Any validation error from [`CatalogConfig::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a JSON catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Validates catalog-level uniqueness and completeness rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sections(&self.sections)?;

        let mut action_ids = BTreeSet::new();
        for action in &self.quick_actions {
            let action_id = action.id.trim();
            if action_id.is_empty() {
                return Err(ConfigError::EmptyQuickActionId);
            }
            if !action_ids.insert(action_id) {
                return Err(ConfigError::DuplicateQuickActionId(action_id.to_string()));
            }
        }

        Ok(())
    }
}

/// Section rules shared by catalog loading and section hydration.
///
/// # Errors
/// - `EmptySectionTitle` / `DuplicateSection` for blank or repeated titles.
/// - `EmptyItemId` / `DuplicateItemId` for blank or repeated item ids within
///   one section.
/// - `MissingUrl` for an external-link item without a url.
pub fn validate_sections(sections: &[MoreSection]) -> Result<(), ValidationError> {
    let mut titles = BTreeSet::new();
    for section in sections {
        let title = section.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptySectionTitle);
        }
        if !titles.insert(title) {
            return Err(ValidationError::DuplicateSection(title.to_string()));
        }

        let mut item_ids = BTreeSet::new();
        for item in &section.items {
            let item_id = item.id.trim();
            if item_id.is_empty() {
                return Err(ValidationError::EmptyItemId {
                    section: title.to_string(),
                });
            }
            if !item_ids.insert(item_id) {
                return Err(ValidationError::DuplicateItemId {
                    section: title.to_string(),
                    item_id: item_id.to_string(),
                });
            }
            let has_url = item
                .url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty());
            if item.action == ItemAction::ExternalLink && !has_url {
                return Err(ValidationError::MissingUrl {
                    section: title.to_string(),
                    item_id: item_id.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn nav(id: &str, title: &str, icon: &str) -> MoreItem {
    MoreItem {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        action: ItemAction::Navigate,
        url: None,
        destructive: false,
    }
}

fn link(id: &str, title: &str, icon: &str, url: &str) -> MoreItem {
    MoreItem {
        action: ItemAction::ExternalLink,
        url: Some(url.to_string()),
        ..nav(id, title, icon)
    }
}

fn destructive(id: &str, title: &str, icon: &str) -> MoreItem {
    MoreItem {
        action: ItemAction::DestructiveAction,
        destructive: true,
        ..nav(id, title, icon)
    }
}

fn quick(id: &str, title: &str, icon: &str, color: &str, handler: &str) -> QuickAction {
    QuickAction {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        handler: handler.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogConfig;
    use crate::config::ConfigError;
    use crate::model::validation::ValidationError;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = CatalogConfig::builtin();
        catalog.validate().expect("builtin catalog must validate");
        assert_eq!(catalog.sections.len(), 5);
        assert_eq!(catalog.quick_actions.len(), 4);
    }

    #[test]
    fn parses_minimal_json_catalog() {
        let raw = r#"{
            "sections": [
                {"title": "Tools", "items": [
                    {"id": "export", "title": "Export", "icon": "download", "action": "navigate"}
                ]}
            ]
        }"#;
        let catalog = CatalogConfig::from_json_str(raw).expect("valid catalog");
        assert_eq!(catalog.sections[0].items[0].url, None);
        assert!(catalog.quick_actions.is_empty());
    }

    #[test]
    fn rejects_duplicate_section_titles() {
        let raw = r#"{"sections": [
            {"title": "Tools", "items": []},
            {"title": "Tools", "items": []}
        ]}"#;
        let err = CatalogConfig::from_json_str(raw).expect_err("duplicate title must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidSection(ValidationError::DuplicateSection(title)) if title == "Tools"
        ));
    }

    #[test]
    fn rejects_duplicate_item_ids_within_section() {
        let raw = r#"{"sections": [{"title": "Tools", "items": [
            {"id": "a", "title": "A", "icon": "x", "action": "navigate"},
            {"id": "a", "title": "B", "icon": "x", "action": "navigate"}
        ]}]}"#;
        let err = CatalogConfig::from_json_str(raw).expect_err("duplicate item must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidSection(ValidationError::DuplicateItemId { .. })
        ));
    }

    #[test]
    fn rejects_external_link_without_url() {
        let raw = r#"{"sections": [{"title": "Support", "items": [
            {"id": "help", "title": "Help", "icon": "x", "action": "external_link"}
        ]}]}"#;
        let err = CatalogConfig::from_json_str(raw).expect_err("missing url must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidSection(ValidationError::MissingUrl { .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CatalogConfig::from_json_str("{").expect_err("malformed json must fail");
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
