//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - Drive a short intent script and print derived state deterministically.
//!
//! Set `TASKDECK_CATALOG_PATH` to a JSON catalog to replace the built-in
//! more menu.

use std::error::Error;
use taskdeck_core::selector::has_search_results;
use taskdeck_core::{
    AppStore, CatalogConfig, MoreIntent, Priority, Selectors, StoreConfig, TaskDraft, TaskIntent,
};

const CATALOG_PATH_ENV: &str = "TASKDECK_CATALOG_PATH";

fn main() -> Result<(), Box<dyn Error>> {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let config = load_config()?;
    let mut store = AppStore::new(&config);
    let mut selectors = Selectors::new(&config);

    let mut ids = Vec::new();
    for (title, priority) in [
        ("Buy milk", Priority::Low),
        ("Ship release", Priority::High),
        ("Call mom", Priority::Medium),
    ] {
        let draft = TaskDraft {
            priority,
            ..TaskDraft::titled(title)
        };
        let transition = store.dispatch(TaskIntent::Create(draft));
        println!("intent=create_task title={title:?} outcome={}", transition.as_str());
        if let Some(task) = store.state().task.tasks().last() {
            ids.push(task.id);
        }
    }
    if let Some(first) = ids.first() {
        store.dispatch(TaskIntent::ToggleComplete(*first));
    }
    let rejected = store.dispatch(TaskIntent::Create(TaskDraft::titled("  ")));
    println!("intent=create_task title=\"  \" outcome={}", rejected.as_str());

    let state = store.snapshot();
    let stats = selectors.task.task_stats(&state.task);
    println!(
        "tasks total={} pending={} completed={} progress={}%",
        stats.total_tasks, stats.pending_count, stats.completed_count, stats.progress_percentage
    );
    for task in selectors.task.pending_by_priority(&state.task).iter() {
        println!("pending priority={} title={:?}", task.priority.as_str(), task.title);
    }

    store.dispatch(MoreIntent::SetSearchQuery("tool".to_string()));
    let state = store.snapshot();
    let shown = selectors.more.display_sections(&state.more);
    let titles: Vec<&str> = shown.iter().map(|section| section.title.as_str()).collect();
    println!(
        "more query={:?} sections={:?} has_results={}",
        state.more.search_query().as_ref(),
        titles,
        has_search_results(&state.more)
    );
    let more_stats = selectors.more.more_stats(&state.more);
    println!(
        "more sections={} items={} quick_actions={}",
        more_stats.total_sections, more_stats.total_items, more_stats.quick_actions_count
    );
    Ok(())
}

fn load_config() -> Result<StoreConfig, Box<dyn Error>> {
    match std::env::var(CATALOG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let catalog = CatalogConfig::from_json_file(path.trim())?;
            Ok(StoreConfig::with_catalog(catalog)?)
        }
        _ => Ok(StoreConfig::default()),
    }
}
