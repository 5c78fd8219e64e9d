//! Task slice snapshot and reducer.
//!
//! # Invariants
//! - At most one task has `is_selected == true`.
//! - Insertion order is display order; new tasks are appended.
//! - Untouched tasks keep their `Arc` identity across intents.

use crate::model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
use crate::store::Transition;
use log::warn;
use std::collections::HashSet;
use std::sync::Arc;

/// Shared, ordered task collection.
pub type TaskList = Arc<Vec<Arc<Task>>>;

/// Immutable snapshot of the task slice.
#[derive(Debug, Clone, Default)]
pub struct TaskSlice {
    tasks: TaskList,
    draft: TaskDraft,
    is_create_task_open: bool,
    loading: bool,
    error: Option<String>,
}

impl TaskSlice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot hydrated from externally supplied tasks.
    ///
    /// Duplicate ids keep the first occurrence and only the first selected
    /// task stays selected.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(normalize_hydrated(tasks)),
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn is_create_task_open(&self) -> bool {
        self.is_create_task_open
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last validation message, cleared by the next applied intent.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// Named task slice transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskIntent {
    /// Create a task from an explicit draft payload.
    Create(TaskDraft),
    /// Create a task from the slice's own form draft.
    SubmitDraft,
    Update {
        id: TaskId,
        patch: TaskPatch,
    },
    ToggleComplete(TaskId),
    Select(TaskId),
    Deselect,
    Delete(TaskId),
    SetDraftTitle(String),
    SetDraftDescription(String),
    SetDraftCategory(String),
    SetDraftPriority(Priority),
    SetDraftDueDate(String),
    SetDraftDueTime(String),
    AddDraftTag(String),
    RemoveDraftTag(String),
    ResetDraft,
    SetCreateTaskOpen(bool),
    SetLoading(bool),
    ClearError,
    /// Replace the whole collection with persisted/network data.
    Hydrate(Vec<Task>),
}

impl TaskIntent {
    /// Stable intent name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create_task",
            Self::SubmitDraft => "submit_draft",
            Self::Update { .. } => "update_task",
            Self::ToggleComplete(_) => "toggle_complete",
            Self::Select(_) => "select_task",
            Self::Deselect => "deselect_task",
            Self::Delete(_) => "delete_task",
            Self::SetDraftTitle(_) => "set_draft_title",
            Self::SetDraftDescription(_) => "set_draft_description",
            Self::SetDraftCategory(_) => "set_draft_category",
            Self::SetDraftPriority(_) => "set_draft_priority",
            Self::SetDraftDueDate(_) => "set_draft_due_date",
            Self::SetDraftDueTime(_) => "set_draft_due_time",
            Self::AddDraftTag(_) => "add_draft_tag",
            Self::RemoveDraftTag(_) => "remove_draft_tag",
            Self::ResetDraft => "reset_draft",
            Self::SetCreateTaskOpen(_) => "set_create_task_open",
            Self::SetLoading(_) => "set_task_loading",
            Self::ClearError => "clear_task_error",
            Self::Hydrate(_) => "hydrate_tasks",
        }
    }
}

/// Applies one intent to a task snapshot.
///
/// Every applied intent except `SetLoading` clears `error`; a rejected
/// intent sets it and leaves canonical data untouched.
pub fn reduce_task(state: &TaskSlice, intent: TaskIntent) -> (TaskSlice, Transition) {
    let keeps_error = matches!(intent, TaskIntent::SetLoading(_));
    let mut next = state.clone();

    let transition = match intent {
        TaskIntent::Create(draft) => create(&mut next, &draft),
        TaskIntent::SubmitDraft => {
            let draft = next.draft.clone();
            create(&mut next, &draft)
        }
        TaskIntent::Update { id, patch } => update(&mut next, id, &patch),
        TaskIntent::ToggleComplete(id) => toggle_complete(&mut next, id),
        TaskIntent::Select(id) => select(&mut next, id),
        TaskIntent::Deselect => {
            deselect(&mut next);
            Transition::Applied
        }
        TaskIntent::Delete(id) => delete(&mut next, id),
        TaskIntent::SetDraftTitle(title) => {
            next.draft.title = title;
            Transition::Applied
        }
        TaskIntent::SetDraftDescription(description) => {
            next.draft.description = description;
            Transition::Applied
        }
        TaskIntent::SetDraftCategory(category) => {
            next.draft.category = category;
            Transition::Applied
        }
        TaskIntent::SetDraftPriority(priority) => {
            next.draft.priority = priority;
            Transition::Applied
        }
        TaskIntent::SetDraftDueDate(due_date) => {
            next.draft.due_date = due_date;
            Transition::Applied
        }
        TaskIntent::SetDraftDueTime(due_time) => {
            next.draft.due_time = due_time;
            Transition::Applied
        }
        TaskIntent::AddDraftTag(tag) => {
            let trimmed = tag.trim();
            if !trimmed.is_empty() && !next.draft.tags.iter().any(|seen| seen == trimmed) {
                next.draft.tags.push(trimmed.to_string());
            }
            Transition::Applied
        }
        TaskIntent::RemoveDraftTag(tag) => {
            let trimmed = tag.trim();
            next.draft.tags.retain(|seen| seen != trimmed);
            Transition::Applied
        }
        TaskIntent::ResetDraft => {
            next.draft = TaskDraft::default();
            Transition::Applied
        }
        TaskIntent::SetCreateTaskOpen(open) => {
            next.is_create_task_open = open;
            Transition::Applied
        }
        TaskIntent::SetLoading(loading) => {
            next.loading = loading;
            Transition::Applied
        }
        TaskIntent::ClearError => Transition::Applied,
        TaskIntent::Hydrate(tasks) => {
            next.tasks = Arc::new(normalize_hydrated(tasks));
            Transition::Applied
        }
    };

    match &transition {
        Transition::Applied if !keeps_error => next.error = None,
        Transition::Rejected(err) => next.error = Some(err.to_string()),
        _ => {}
    }
    (next, transition)
}

fn create(next: &mut TaskSlice, draft: &TaskDraft) -> Transition {
    let task = match Task::from_draft(draft) {
        Ok(task) => task,
        Err(err) => return Transition::Rejected(err),
    };

    let mut tasks = next.tasks.as_ref().clone();
    tasks.push(Arc::new(task));
    next.tasks = Arc::new(tasks);
    next.draft = TaskDraft::default();
    next.is_create_task_open = false;
    Transition::Applied
}

fn update(next: &mut TaskSlice, id: TaskId, patch: &TaskPatch) -> Transition {
    let Some(index) = next.position(id) else {
        return Transition::NoopNotFound;
    };
    let patched = match next.tasks[index].patched(patch) {
        Ok(task) => task,
        Err(err) => return Transition::Rejected(err),
    };

    let mut tasks = next.tasks.as_ref().clone();
    tasks[index] = Arc::new(patched);
    next.tasks = Arc::new(tasks);
    Transition::Applied
}

fn toggle_complete(next: &mut TaskSlice, id: TaskId) -> Transition {
    let Some(index) = next.position(id) else {
        return Transition::NoopNotFound;
    };

    let mut tasks = next.tasks.as_ref().clone();
    let toggled = Task {
        completed: !tasks[index].completed,
        ..tasks[index].as_ref().clone()
    };
    tasks[index] = Arc::new(toggled);
    next.tasks = Arc::new(tasks);
    Transition::Applied
}

fn select(next: &mut TaskSlice, id: TaskId) -> Transition {
    if next.position(id).is_none() {
        return Transition::NoopNotFound;
    }
    set_selection(next, Some(id));
    Transition::Applied
}

fn deselect(next: &mut TaskSlice) {
    set_selection(next, None);
}

/// Rewrites only the tasks whose selection flag changes.
fn set_selection(next: &mut TaskSlice, target: Option<TaskId>) {
    let is_target = |task: &Task| Some(task.id) == target;
    if next
        .tasks
        .iter()
        .all(|task| task.is_selected == is_target(task))
    {
        return;
    }

    let tasks = next
        .tasks
        .iter()
        .map(|task| {
            let selected = is_target(task);
            if task.is_selected == selected {
                Arc::clone(task)
            } else {
                Arc::new(Task {
                    is_selected: selected,
                    ..task.as_ref().clone()
                })
            }
        })
        .collect();
    next.tasks = Arc::new(tasks);
}

fn delete(next: &mut TaskSlice, id: TaskId) -> Transition {
    let Some(index) = next.position(id) else {
        return Transition::NoopNotFound;
    };

    let mut tasks = next.tasks.as_ref().clone();
    tasks.remove(index);
    next.tasks = Arc::new(tasks);
    Transition::Applied
}

fn normalize_hydrated(tasks: Vec<Task>) -> Vec<Arc<Task>> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut has_selection = false;
    let mut dropped_duplicates = 0usize;
    let mut cleared_selections = 0usize;
    let mut normalized = Vec::with_capacity(tasks.len());

    for mut task in tasks {
        if !seen.insert(task.id) {
            dropped_duplicates += 1;
            continue;
        }
        if task.is_selected {
            if has_selection {
                task.is_selected = false;
                cleared_selections += 1;
            } else {
                has_selection = true;
            }
        }
        normalized.push(Arc::new(task));
    }

    if dropped_duplicates > 0 || cleared_selections > 0 {
        warn!(
            "event=tasks_hydrate module=store status=normalized dropped_duplicates={} cleared_selections={}",
            dropped_duplicates, cleared_selections
        );
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{reduce_task, TaskIntent, TaskSlice};
    use crate::model::task::{Task, TaskDraft};
    use crate::store::Transition;
    use std::sync::Arc;
    use uuid::Uuid;

    fn slice_with(titles: &[&str]) -> TaskSlice {
        let tasks = titles
            .iter()
            .map(|title| Task::from_draft(&TaskDraft::titled(*title)).expect("valid draft"))
            .collect();
        TaskSlice::with_tasks(tasks)
    }

    #[test]
    fn toggle_only_replaces_the_target_task() {
        let state = slice_with(&["a", "b"]);
        let target = state.tasks()[0].id;

        let (next, transition) = reduce_task(&state, TaskIntent::ToggleComplete(target));
        assert_eq!(transition, Transition::Applied);
        assert!(next.tasks()[0].completed);
        assert!(!state.tasks()[0].completed, "input snapshot must not change");
        assert!(Arc::ptr_eq(&state.tasks()[1], &next.tasks()[1]));
        assert!(!Arc::ptr_eq(state.tasks(), next.tasks()));
    }

    #[test]
    fn missing_id_is_reported_and_keeps_collection_identity() {
        let state = slice_with(&["a"]);
        let (next, transition) = reduce_task(&state, TaskIntent::Delete(Uuid::new_v4()));
        assert_eq!(transition, Transition::NoopNotFound);
        assert!(Arc::ptr_eq(state.tasks(), next.tasks()));
    }

    #[test]
    fn draft_intents_build_up_a_submittable_task() {
        let state = TaskSlice::new();
        let (state, _) = reduce_task(&state, TaskIntent::SetCreateTaskOpen(true));
        let (state, _) = reduce_task(&state, TaskIntent::SetDraftTitle("Water plants".into()));
        let (state, _) = reduce_task(&state, TaskIntent::AddDraftTag("home".into()));
        let (state, _) = reduce_task(&state, TaskIntent::AddDraftTag(" home ".into()));
        assert_eq!(state.draft().tags, vec!["home"]);

        let (state, transition) = reduce_task(&state, TaskIntent::SubmitDraft);
        assert_eq!(transition, Transition::Applied);
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].tags, vec!["home"]);
        assert_eq!(state.draft(), &TaskDraft::default());
        assert!(!state.is_create_task_open());
    }

    #[test]
    fn rejected_submit_keeps_draft_for_correction() {
        let state = TaskSlice::new();
        let (state, _) = reduce_task(&state, TaskIntent::SetDraftDescription("no title".into()));
        let (state, transition) = reduce_task(&state, TaskIntent::SubmitDraft);
        assert!(matches!(transition, Transition::Rejected(_)));
        assert_eq!(state.draft().description, "no title");
        assert!(state.error().is_some());

        let (state, _) = reduce_task(&state, TaskIntent::SetLoading(true));
        assert!(state.error().is_some(), "loading toggles keep the message");
        let (state, _) = reduce_task(&state, TaskIntent::ClearError);
        assert!(state.error().is_none());
    }

    #[test]
    fn hydrate_enforces_unique_ids_and_single_selection() {
        let mut first = Task::from_draft(&TaskDraft::titled("first")).expect("valid draft");
        first.is_selected = true;
        let mut second = Task::from_draft(&TaskDraft::titled("second")).expect("valid draft");
        second.is_selected = true;
        let duplicate = first.clone();

        let (state, _) = reduce_task(
            &TaskSlice::new(),
            TaskIntent::Hydrate(vec![first.clone(), second, duplicate]),
        );
        assert_eq!(state.tasks().len(), 2);
        assert_eq!(
            state.tasks().iter().filter(|task| task.is_selected).count(),
            1
        );
        assert!(state.task(first.id).expect("first kept").is_selected);
    }
}
