use std::sync::Arc;
use taskdeck_core::selector::{has_search_results, tools_section};
use taskdeck_core::{
    AppStore, ItemAction, MoreIntent, MoreItem, MoreSection, Selectors, Transition,
    ValidationError,
};

fn section(title: &str, item_titles: &[&str]) -> MoreSection {
    MoreSection {
        title: title.to_string(),
        items: item_titles
            .iter()
            .enumerate()
            .map(|(idx, item)| MoreItem {
                id: format!("{}-{idx}", title.to_lowercase()),
                title: (*item).to_string(),
                icon: "dot".to_string(),
                action: ItemAction::Navigate,
                url: None,
                destructive: false,
            })
            .collect(),
    }
}

fn three_section_store() -> AppStore {
    let mut store = AppStore::default();
    let transition = store.dispatch(MoreIntent::HydrateSections(vec![
        section("Productivity", &["Focus Timer", "Habits"]),
        section("Tools", &["Export Data", "Widgets"]),
        section("Community", &["Leaderboards", "Invite Friends"]),
    ]));
    assert_eq!(transition, Transition::Applied);
    store
}

#[test]
fn search_keeps_only_matching_sections() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();
    store.dispatch(MoreIntent::SetSearchQuery("tool".into()));

    let state = store.snapshot();
    let shown = selectors.more.display_sections(&state.more);
    let titles: Vec<&str> = shown.iter().map(|section| section.title.as_str()).collect();
    assert_eq!(titles, vec!["Tools"]);
    assert!(has_search_results(&state.more));
}

#[test]
fn search_matches_item_titles_case_insensitively() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();
    store.dispatch(MoreIntent::SetSearchQuery("HABIT".into()));

    let shown = selectors.more.display_sections(&store.state().more);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Productivity");
    assert_eq!(shown[0].items.len(), 2, "matching sections keep every item");
}

#[test]
fn unmatched_query_shows_empty_list_without_results() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();
    store.dispatch(MoreIntent::SetSearchQuery("zzz".into()));

    let state = store.snapshot();
    assert!(selectors.more.display_sections(&state.more).is_empty());
    assert!(!has_search_results(&state.more));
}

#[test]
fn whitespace_query_reports_no_results() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();
    store.dispatch(MoreIntent::SetSearchQuery("   ".into()));

    let state = store.snapshot();
    assert!(state.more.filtered_sections().is_empty());
    assert!(selectors.more.display_sections(&state.more).is_empty());
    assert!(!has_search_results(&state.more));
}

#[test]
fn display_sections_follows_query_emptiness() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();

    for query in ["", "tool", "o", "", "community"] {
        store.dispatch(MoreIntent::SetSearchQuery(query.into()));
        let state = store.snapshot();
        let shown = selectors.more.display_sections(&state.more);
        let expected = if query.is_empty() {
            state.more.sections()
        } else {
            state.more.filtered_sections()
        };
        assert!(Arc::ptr_eq(&shown, expected), "query `{query}`");
    }
}

#[test]
fn clearing_search_restores_canonical_sections() {
    let mut store = three_section_store();
    let mut selectors = Selectors::default();
    store.dispatch(MoreIntent::SetShowSearch(true));
    store.dispatch(MoreIntent::SetSearchQuery("tool".into()));
    store.dispatch(MoreIntent::SetShowSearch(false));

    let state = store.snapshot();
    assert!(state.more.search_query().is_empty());
    assert!(!state.more.show_search());
    let shown = selectors.more.display_sections(&state.more);
    assert!(Arc::ptr_eq(&shown, state.more.sections()));
    assert!(!has_search_results(&state.more));
}

#[test]
fn named_section_lookup_survives_search() {
    let mut store = AppStore::default();
    store.dispatch(MoreIntent::SetSearchQuery("leader".into()));

    let state = store.snapshot();
    let tools = tools_section(&state.more).unwrap();
    assert_eq!(tools.title, "Tools");
    assert!(std::ptr::eq(tools, &state.more.sections()[1]));
}

#[test]
fn duplicate_hydrated_titles_leave_sections_untouched() {
    let mut store = three_section_store();
    let before = store.snapshot();

    let transition = store.dispatch(MoreIntent::HydrateSections(vec![
        section("Tools", &[]),
        section("Tools", &[]),
    ]));
    assert!(!transition.is_applied());

    let after = store.snapshot();
    assert!(Arc::ptr_eq(before.more.sections(), after.more.sections()));
    assert!(after.more.error().is_some());
}

#[test]
fn duplicate_item_ids_within_a_section_are_rejected() {
    let mut store = three_section_store();
    let before = store.snapshot();
    let mut tools = section("Tools", &["Export Data", "Widgets"]);
    tools.items[1].id = tools.items[0].id.clone();

    let transition = store.dispatch(MoreIntent::HydrateSections(vec![tools]));
    assert!(matches!(
        transition,
        Transition::Rejected(ValidationError::DuplicateItemId { .. })
    ));
    assert!(Arc::ptr_eq(before.more.sections(), store.state().more.sections()));
}

#[test]
fn hydration_applies_catalog_rules() {
    let mut store = three_section_store();

    let blank = section("  ", &["Anything"]);
    assert_eq!(
        store.dispatch(MoreIntent::HydrateSections(vec![blank])),
        Transition::Rejected(ValidationError::EmptySectionTitle)
    );

    let mut support = section("Support", &["Help Center"]);
    support.items[0].action = ItemAction::ExternalLink;
    assert!(matches!(
        store.dispatch(MoreIntent::HydrateSections(vec![support.clone()])),
        Transition::Rejected(ValidationError::MissingUrl { .. })
    ));

    support.items[0].url = Some("https://example.com/help".to_string());
    assert_eq!(
        store.dispatch(MoreIntent::HydrateSections(vec![support])),
        Transition::Applied
    );
    assert_eq!(store.state().more.sections().len(), 1);
}
