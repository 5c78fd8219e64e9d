//! Task slice selectors.

use crate::aggregate::TaskStats;
use crate::model::task::Task;
use crate::selector::memo::Memo;
use crate::store::{TaskList, TaskSlice};
use std::collections::HashSet;
use std::sync::Arc;

/// Memoized derivations over a [`TaskSlice`].
#[derive(Debug)]
pub struct TaskSelectors {
    pending: Memo<TaskList, TaskList>,
    completed: Memo<TaskList, TaskList>,
    selected: Memo<TaskList, Option<Arc<Task>>>,
    stats: Memo<(TaskList, TaskList), Arc<TaskStats>>,
    pending_by_priority: Memo<TaskList, TaskList>,
    categories: Memo<TaskList, Arc<Vec<String>>>,
}

impl TaskSelectors {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Memo::new(capacity),
            completed: Memo::new(capacity),
            selected: Memo::new(capacity),
            stats: Memo::new(capacity),
            pending_by_priority: Memo::new(capacity),
            categories: Memo::new(capacity),
        }
    }

    /// Tasks with `completed == false`, in display order.
    pub fn pending_tasks(&mut self, slice: &TaskSlice) -> TaskList {
        self.pending
            .get_or_compute(Arc::clone(slice.tasks()), |tasks| {
                keep(tasks, |task| !task.completed)
            })
    }

    /// Tasks with `completed == true`, in display order.
    pub fn completed_tasks(&mut self, slice: &TaskSlice) -> TaskList {
        self.completed
            .get_or_compute(Arc::clone(slice.tasks()), |tasks| {
                keep(tasks, |task| task.completed)
            })
    }

    /// The selected task, if any.
    pub fn selected_task(&mut self, slice: &TaskSlice) -> Option<Arc<Task>> {
        self.selected
            .get_or_compute(Arc::clone(slice.tasks()), |tasks| {
                tasks.iter().find(|task| task.is_selected).cloned()
            })
    }

    /// Counts and progress derived from the two partitions.
    pub fn task_stats(&mut self, slice: &TaskSlice) -> Arc<TaskStats> {
        let pending = self.pending_tasks(slice);
        let completed = self.completed_tasks(slice);
        self.stats.get_or_compute((pending, completed), |(pending, completed)| {
            Arc::new(TaskStats::from_partitions(pending.len(), completed.len()))
        })
    }

    /// Pending tasks ordered high → low priority, stable within a priority.
    pub fn pending_by_priority(&mut self, slice: &TaskSlice) -> TaskList {
        let pending = self.pending_tasks(slice);
        self.pending_by_priority.get_or_compute(pending, |pending| {
            let mut ordered = pending.as_ref().clone();
            ordered.sort_by_key(|task| task.priority.urgency_rank());
            Arc::new(ordered)
        })
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&mut self, slice: &TaskSlice) -> Arc<Vec<String>> {
        self.categories
            .get_or_compute(Arc::clone(slice.tasks()), |tasks| {
                let mut seen = HashSet::new();
                let categories = tasks
                    .iter()
                    .map(|task| task.category.as_str())
                    .filter(|category| !category.is_empty() && seen.insert(*category))
                    .map(str::to_string)
                    .collect();
                Arc::new(categories)
            })
    }
}

fn keep(tasks: &TaskList, predicate: impl Fn(&Task) -> bool) -> TaskList {
    Arc::new(
        tasks
            .iter()
            .filter(|task| predicate(task))
            .cloned()
            .collect(),
    )
}
