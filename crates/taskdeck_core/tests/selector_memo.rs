use std::sync::Arc;
use taskdeck_core::{
    AppStore, MoreIntent, Selectors, StoreConfig, TaskDraft, TaskIntent,
};

#[test]
fn unchanged_inputs_return_identical_results() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(TaskIntent::Create(TaskDraft::titled("memo")));

    let state = store.snapshot();
    let pending = selectors.task.pending_tasks(&state.task);
    let stats = selectors.task.task_stats(&state.task);
    let sections = selectors.more.display_sections(&state.more);

    assert!(Arc::ptr_eq(&pending, &selectors.task.pending_tasks(&state.task)));
    assert!(Arc::ptr_eq(&stats, &selectors.task.task_stats(&state.task)));
    assert!(Arc::ptr_eq(&sections, &selectors.more.display_sections(&state.more)));
}

#[test]
fn other_slice_intents_keep_task_results() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(TaskIntent::Create(TaskDraft::titled("steady")));
    let stats = selectors.task.task_stats(&store.state().task);

    store.dispatch(MoreIntent::SetSearchQuery("help".into()));
    store.dispatch(TaskIntent::SetCreateTaskOpen(true));

    assert!(Arc::ptr_eq(&stats, &selectors.task.task_stats(&store.state().task)));
}

#[test]
fn task_changes_invalidate_stats() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(TaskIntent::Create(TaskDraft::titled("first")));
    let before = selectors.task.task_stats(&store.state().task);

    store.dispatch(TaskIntent::Create(TaskDraft::titled("second")));
    let after = selectors.task.task_stats(&store.state().task);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.total_tasks, 2);
}

#[test]
fn larger_capacity_remembers_older_snapshots() {
    let config = StoreConfig {
        memo_capacity: 4,
        ..StoreConfig::default()
    };
    let mut store = AppStore::new(&config);
    let mut selectors = Selectors::new(&config);

    let empty = store.snapshot();
    let empty_pending = selectors.task.pending_tasks(&empty.task);
    store.dispatch(TaskIntent::Create(TaskDraft::titled("one")));
    selectors.task.pending_tasks(&store.state().task);

    assert!(Arc::ptr_eq(
        &empty_pending,
        &selectors.task.pending_tasks(&empty.task)
    ));
}
