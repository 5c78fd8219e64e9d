//! More slice snapshot and reducer.
//!
//! # Invariants
//! - `filtered_sections` always equals the filter of `(sections, search_query)`;
//!   every intent that changes either input recomputes it in the same
//!   transition.
//! - With an empty query `filtered_sections` shares identity with `sections`.

use crate::config::{validate_sections, CatalogConfig};
use crate::model::more::{filter_sections, MoreSection, QuickAction};
use crate::store::Transition;
use std::sync::Arc;

/// Shared, ordered section collection.
pub type SectionList = Arc<Vec<MoreSection>>;
/// Shared quick action collection.
pub type QuickActionList = Arc<Vec<QuickAction>>;

/// Immutable snapshot of the more slice.
#[derive(Debug, Clone)]
pub struct MoreSlice {
    sections: SectionList,
    quick_actions: QuickActionList,
    search_query: Arc<str>,
    filtered_sections: SectionList,
    show_search: bool,
    loading: bool,
    error: Option<String>,
}

impl Default for MoreSlice {
    fn default() -> Self {
        let sections: SectionList = Arc::new(Vec::new());
        Self {
            filtered_sections: Arc::clone(&sections),
            sections,
            quick_actions: Arc::new(Vec::new()),
            search_query: Arc::from(""),
            show_search: false,
            loading: false,
            error: None,
        }
    }
}

impl MoreSlice {
    /// Snapshot populated from static catalog configuration.
    pub fn from_catalog(catalog: &CatalogConfig) -> Self {
        let sections: SectionList = Arc::new(catalog.sections.clone());
        Self {
            filtered_sections: Arc::clone(&sections),
            sections,
            quick_actions: Arc::new(catalog.quick_actions.clone()),
            ..Self::default()
        }
    }

    /// Canonical sections.
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    pub fn quick_actions(&self) -> &QuickActionList {
        &self.quick_actions
    }

    pub fn search_query(&self) -> &Arc<str> {
        &self.search_query
    }

    /// Cached filter result for the current query.
    pub fn filtered_sections(&self) -> &SectionList {
        &self.filtered_sections
    }

    pub fn show_search(&self) -> bool {
        self.show_search
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refilter(&mut self) {
        self.filtered_sections = match filter_sections(&self.sections, &self.search_query) {
            Some(filtered) => Arc::new(filtered),
            None => Arc::clone(&self.sections),
        };
    }
}

/// Named more slice transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoreIntent {
    SetSearchQuery(String),
    ClearSearch,
    /// Hiding the search bar also clears the query.
    SetShowSearch(bool),
    /// Replace sections, e.g. with server-driven menu content.
    HydrateSections(Vec<MoreSection>),
    SetLoading(bool),
    ClearError,
}

impl MoreIntent {
    /// Stable intent name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetSearchQuery(_) => "set_search_query",
            Self::ClearSearch => "clear_search",
            Self::SetShowSearch(_) => "set_show_search",
            Self::HydrateSections(_) => "hydrate_sections",
            Self::SetLoading(_) => "set_more_loading",
            Self::ClearError => "clear_more_error",
        }
    }
}

/// Applies one intent to a more snapshot.
pub fn reduce_more(state: &MoreSlice, intent: MoreIntent) -> (MoreSlice, Transition) {
    let keeps_error = matches!(intent, MoreIntent::SetLoading(_));
    let mut next = state.clone();

    let transition = match intent {
        MoreIntent::SetSearchQuery(query) => {
            set_query(&mut next, query);
            Transition::Applied
        }
        MoreIntent::ClearSearch => {
            set_query(&mut next, String::new());
            Transition::Applied
        }
        MoreIntent::SetShowSearch(show) => {
            next.show_search = show;
            if !show {
                set_query(&mut next, String::new());
            }
            Transition::Applied
        }
        MoreIntent::HydrateSections(sections) => hydrate_sections(&mut next, sections),
        MoreIntent::SetLoading(loading) => {
            next.loading = loading;
            Transition::Applied
        }
        MoreIntent::ClearError => Transition::Applied,
    };

    match &transition {
        Transition::Applied if !keeps_error => next.error = None,
        Transition::Rejected(err) => next.error = Some(err.to_string()),
        _ => {}
    }
    (next, transition)
}

fn set_query(next: &mut MoreSlice, query: String) {
    // Same text keeps the cached filter and its identity.
    if *next.search_query == *query {
        return;
    }
    next.search_query = Arc::from(query);
    next.refilter();
}

fn hydrate_sections(next: &mut MoreSlice, sections: Vec<MoreSection>) -> Transition {
    if let Err(err) = validate_sections(&sections) {
        return Transition::Rejected(err);
    }

    next.sections = Arc::new(sections);
    next.refilter();
    Transition::Applied
}
