//! More slice selectors.

use crate::aggregate::{total_items, MoreStats};
use crate::model::more::{
    MoreSection, ACCOUNT_SECTION, COMMUNITY_SECTION, PRODUCTIVITY_SECTION, SUPPORT_SECTION,
    TOOLS_SECTION,
};
use crate::selector::memo::Memo;
use crate::store::{MoreSlice, QuickActionList, SectionList};
use std::sync::Arc;

/// Memoized derivations over a [`MoreSlice`].
#[derive(Debug)]
pub struct MoreSelectors {
    display_sections: Memo<(Arc<str>, SectionList, SectionList), SectionList>,
    total_items: Memo<SectionList, usize>,
    stats: Memo<(SectionList, QuickActionList), Arc<MoreStats>>,
}

impl MoreSelectors {
    pub fn new(capacity: usize) -> Self {
        Self {
            display_sections: Memo::new(capacity),
            total_items: Memo::new(capacity),
            stats: Memo::new(capacity),
        }
    }

    /// `filtered_sections` while searching, otherwise the canonical sections.
    pub fn display_sections(&mut self, slice: &MoreSlice) -> SectionList {
        let key = (
            Arc::clone(slice.search_query()),
            Arc::clone(slice.filtered_sections()),
            Arc::clone(slice.sections()),
        );
        self.display_sections
            .get_or_compute(key, |(query, filtered, sections)| {
                if query.is_empty() {
                    Arc::clone(sections)
                } else {
                    Arc::clone(filtered)
                }
            })
    }

    /// Item count over all canonical sections.
    pub fn total_items(&mut self, slice: &MoreSlice) -> usize {
        self.total_items
            .get_or_compute(Arc::clone(slice.sections()), |sections| {
                total_items(sections)
            })
    }

    pub fn more_stats(&mut self, slice: &MoreSlice) -> Arc<MoreStats> {
        let key = (
            Arc::clone(slice.sections()),
            Arc::clone(slice.quick_actions()),
        );
        self.stats.get_or_compute(key, |(sections, quick_actions)| {
            Arc::new(MoreStats {
                total_sections: sections.len(),
                total_items: total_items(sections),
                quick_actions_count: quick_actions.len(),
            })
        })
    }
}

/// A query is active and matched at least one section.
pub fn has_search_results(slice: &MoreSlice) -> bool {
    !slice.search_query().is_empty() && !slice.filtered_sections().is_empty()
}

/// First canonical section whose title equals `title` exactly.
///
/// The returned reference points into the shared section list, so it stays
/// the same object for as long as the list is unchanged.
pub fn section_titled<'a>(slice: &'a MoreSlice, title: &str) -> Option<&'a MoreSection> {
    slice
        .sections()
        .iter()
        .find(|section| section.title == title)
}

pub fn productivity_section(slice: &MoreSlice) -> Option<&MoreSection> {
    section_titled(slice, PRODUCTIVITY_SECTION)
}

pub fn tools_section(slice: &MoreSlice) -> Option<&MoreSection> {
    section_titled(slice, TOOLS_SECTION)
}

pub fn community_section(slice: &MoreSlice) -> Option<&MoreSection> {
    section_titled(slice, COMMUNITY_SECTION)
}

pub fn support_section(slice: &MoreSlice) -> Option<&MoreSection> {
    section_titled(slice, SUPPORT_SECTION)
}

pub fn account_section(slice: &MoreSlice) -> Option<&MoreSection> {
    section_titled(slice, ACCOUNT_SECTION)
}

#[cfg(test)]
mod tests {
    use super::{account_section, has_search_results, section_titled, MoreSelectors};
    use crate::config::CatalogConfig;
    use crate::store::{reduce_more, MoreIntent, MoreSlice};
    use std::sync::Arc;

    #[test]
    fn named_lookup_requires_exact_title() {
        let slice = MoreSlice::from_catalog(&CatalogConfig::builtin());
        assert!(account_section(&slice).is_some());
        assert!(section_titled(&slice, "account").is_none());
    }

    #[test]
    fn whitespace_query_is_active_but_has_no_results() {
        let slice = MoreSlice::from_catalog(&CatalogConfig::builtin());
        let (searching, _) = reduce_more(&slice, MoreIntent::SetSearchQuery("   ".into()));
        assert!(!has_search_results(&searching));

        let mut selectors = MoreSelectors::new(1);
        let shown = selectors.display_sections(&searching);
        assert!(Arc::ptr_eq(&shown, searching.filtered_sections()));
        assert!(shown.is_empty());
    }

    #[test]
    fn builtin_stats_count_every_item() {
        let slice = MoreSlice::from_catalog(&CatalogConfig::builtin());
        let mut selectors = MoreSelectors::new(1);
        let stats = selectors.more_stats(&slice);
        assert_eq!(stats.total_sections, 5);
        assert_eq!(stats.total_items, 16);
        assert_eq!(stats.quick_actions_count, 4);
        assert_eq!(selectors.total_items(&slice), 16);
    }
}
