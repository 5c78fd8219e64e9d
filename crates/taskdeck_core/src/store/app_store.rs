//! Application state container.
//!
//! # Responsibility
//! - Own the current [`AppSnapshot`] and apply intents in submission order.
//! - Notify subscribers (persistence/sync collaborators) after each swap.
//!
//! # Invariants
//! - `dispatch` takes `&mut self`; the container is single-writer.
//! - Snapshots handed out earlier never observe later mutations.
//! - `NoopNotFound` leaves the current snapshot (and its identity) in place.

use crate::config::StoreConfig;
use crate::store::home_slice::{reduce_home, HomeIntent, HomeSlice};
use crate::store::more_slice::{reduce_more, MoreIntent, MoreSlice};
use crate::store::task_slice::{reduce_task, TaskIntent, TaskSlice};
use crate::store::Transition;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Complete application state at one instant.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub task: Arc<TaskSlice>,
    pub more: Arc<MoreSlice>,
    pub home: Arc<HomeSlice>,
}

/// Any intent addressed to one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Task(TaskIntent),
    More(MoreIntent),
    Home(HomeIntent),
}

impl Intent {
    /// Stable intent name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Task(intent) => intent.name(),
            Self::More(intent) => intent.name(),
            Self::Home(intent) => intent.name(),
        }
    }

    fn slice(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::More(_) => "more",
            Self::Home(_) => "home",
        }
    }
}

impl From<TaskIntent> for Intent {
    fn from(value: TaskIntent) -> Self {
        Self::Task(value)
    }
}

impl From<MoreIntent> for Intent {
    fn from(value: MoreIntent) -> Self {
        Self::More(value)
    }
}

impl From<HomeIntent> for Intent {
    fn from(value: HomeIntent) -> Self {
        Self::Home(value)
    }
}

/// Applies one intent to a full snapshot.
///
/// Only the addressed slice is replaced; the other slices keep their `Arc`.
pub fn reduce(snapshot: &AppSnapshot, intent: Intent) -> (AppSnapshot, Transition) {
    match intent {
        Intent::Task(intent) => {
            let (task, transition) = reduce_task(&snapshot.task, intent);
            let next = AppSnapshot {
                task: Arc::new(task),
                ..snapshot.clone()
            };
            (next, transition)
        }
        Intent::More(intent) => {
            let (more, transition) = reduce_more(&snapshot.more, intent);
            let next = AppSnapshot {
                more: Arc::new(more),
                ..snapshot.clone()
            };
            (next, transition)
        }
        Intent::Home(intent) => {
            let (home, transition) = reduce_home(&snapshot.home, intent);
            let next = AppSnapshot {
                home: Arc::new(home),
                ..snapshot.clone()
            };
            (next, transition)
        }
    }
}

/// Handle returned by [`AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&Arc<AppSnapshot>) + Send>;

/// Explicitly constructed state container.
pub struct AppStore {
    current: Arc<AppSnapshot>,
    revision: u64,
    listeners: BTreeMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl Debug for AppStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl AppStore {
    /// Creates a store with empty task/home slices and the configured catalog.
    pub fn new(config: &StoreConfig) -> Self {
        let snapshot = AppSnapshot {
            task: Arc::new(TaskSlice::new()),
            more: Arc::new(MoreSlice::from_catalog(&config.catalog)),
            home: Arc::new(HomeSlice::new()),
        };
        info!(
            "event=store_init module=store status=ok sections={} quick_actions={}",
            snapshot.more.sections().len(),
            snapshot.more.quick_actions().len()
        );
        Self::from_snapshot(snapshot)
    }

    /// Creates a store around a hydrated snapshot.
    pub fn from_snapshot(snapshot: AppSnapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
            revision: 0,
            listeners: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot. Holders keep seeing this state after later intents.
    pub fn snapshot(&self) -> Arc<AppSnapshot> {
        Arc::clone(&self.current)
    }

    /// Borrowed view of the current snapshot.
    pub fn state(&self) -> &AppSnapshot {
        &self.current
    }

    /// Number of snapshot swaps since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one intent and swaps in the resulting snapshot.
    ///
    /// `NoopNotFound` keeps the current snapshot and skips notification.
    pub fn dispatch(&mut self, intent: impl Into<Intent>) -> Transition {
        let intent = intent.into();
        let name = intent.name();
        let slice = intent.slice();
        let (next, transition) = reduce(&self.current, intent);

        match &transition {
            Transition::Applied => {
                debug!(
                    "event=intent module=store slice={} intent={} status=applied",
                    slice, name
                );
            }
            Transition::NoopNotFound => {
                debug!(
                    "event=intent module=store slice={} intent={} status=noop_not_found",
                    slice, name
                );
                return transition;
            }
            Transition::Rejected(err) => {
                warn!(
                    "event=intent module=store slice={} intent={} status=rejected error={}",
                    slice, name, err
                );
            }
        }

        self.current = Arc::new(next);
        self.revision += 1;
        for listener in self.listeners.values() {
            listener(&self.current);
        }
        transition
    }

    /// Registers a listener called with every new snapshot.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Arc<AppSnapshot>) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppStore, Intent};
    use crate::model::task::TaskDraft;
    use crate::store::{MoreIntent, TaskIntent, Transition};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn dispatch_replaces_only_the_addressed_slice() {
        let mut store = AppStore::default();
        let before = store.snapshot();

        store.dispatch(TaskIntent::Create(TaskDraft::titled("Stretch")));
        let after = store.snapshot();

        assert!(!Arc::ptr_eq(&before.task, &after.task));
        assert!(Arc::ptr_eq(&before.more, &after.more));
        assert!(Arc::ptr_eq(&before.home, &after.home));
        assert!(before.task.tasks().is_empty(), "old snapshot is frozen");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn noop_keeps_snapshot_identity_and_skips_listeners() {
        let mut store = AppStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let before = store.snapshot();
        let transition = store.dispatch(TaskIntent::ToggleComplete(Uuid::new_v4()));
        assert_eq!(transition, Transition::NoopNotFound);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.dispatch(Intent::More(MoreIntent::SetSearchQuery("tools".into())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let mut store = AppStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(TaskIntent::SetCreateTaskOpen(true));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
