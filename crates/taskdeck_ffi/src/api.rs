//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose intent dispatch and selector reads to Dart via FRB.
//! - Own the single process-wide store and its selector caches.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Intents are applied one at a time under the session lock.
//! - Responses are plain owned DTOs; core `Arc`s never cross the boundary.

use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use taskdeck_core::selector::has_search_results;
use taskdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppStore, CatalogConfig, FeedPost, HomeIntent, HomeStats, Intent, LeaderboardEntry, LogConfig,
    MoreIntent, MoreSection, Notification, Priority, Selectors, StoreConfig, Task, TaskDraft,
    TaskIntent, TaskPatch, TaskStats, Transition,
};
use uuid::Uuid;

const CATALOG_PATH_ENV: &str = "TASKDECK_CATALOG_PATH";
static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match LogConfig::parse(&level, &log_dir).and_then(|config| init_logging_inner(&config)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Create-task form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraftInput {
    pub title: String,
    pub description: String,
    pub category: String,
    /// `low|medium|high`; empty means `medium`.
    pub priority: String,
    /// `YYYY-MM-DD` or empty.
    pub due_date: String,
    /// `HH:MM` or empty.
    pub due_time: String,
    pub tags: Vec<String>,
}

/// Edit-fields payload. `None` keeps the current value; an empty due date
/// or time clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatchInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// `low|medium|high`.
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Feed post as delivered by the network layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPostInput {
    pub id: String,
    pub author: String,
    pub body: String,
    pub likes: u32,
    pub liked_by_me: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardEntryInput {
    pub user_id: String,
    pub display_name: String,
    pub points: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationInput {
    pub id: String,
    pub message: String,
    pub read: bool,
}

/// Task row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub tags: Vec<String>,
    pub completed: bool,
    pub is_selected: bool,
}

/// Task progress summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStatsView {
    pub pending_count: u32,
    pub completed_count: u32,
    pub progress_percentage: u32,
    pub total_tasks: u32,
}

/// More-menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// `navigate|external_link|destructive_action`.
    pub action: String,
    pub url: Option<String>,
    pub destructive: bool,
}

/// More-menu section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub items: Vec<ItemView>,
}

/// Home screen summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeStatsView {
    pub feed_posts: u32,
    pub liked_posts: u32,
    pub unread_notifications: u32,
    /// 1-based competition rank of the signed-in user.
    pub current_rank: Option<u32>,
}

/// Result envelope for intent dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentResponse {
    /// `applied|noop_not_found|rejected|invalid_id|invalid_priority`.
    pub outcome: String,
    /// Human-readable diagnostics; empty when applied.
    pub message: String,
    /// Id of the created task, when the intent created one.
    pub task_id: Option<String>,
}

impl IntentResponse {
    fn from_transition(transition: &Transition) -> Self {
        let message = match transition {
            Transition::Applied => String::new(),
            Transition::NoopNotFound => "No matching record.".to_string(),
            Transition::Rejected(err) => err.to_string(),
        };
        Self {
            outcome: transition.as_str().to_string(),
            message,
            task_id: None,
        }
    }

    fn invalid(outcome: &str, message: String) -> Self {
        Self {
            outcome: outcome.to_string(),
            message,
            task_id: None,
        }
    }
}

/// Creates a task from an explicit draft.
///
/// # FFI contract
/// - Never panics.
/// - `task_id` is set only when the task was created.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(input: TaskDraftInput) -> IntentResponse {
    with_session(|session| session.create_task(input))
}

/// Edits fields of an existing task.
///
/// # FFI contract
/// - Never panics.
/// - A bad id or priority is reported without touching the store.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task_id: String, patch: TaskPatchInput) -> IntentResponse {
    with_session(|session| session.update_task(&task_id, patch))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_complete(task_id: String) -> IntentResponse {
    with_session(|session| session.dispatch_for_task(&task_id, TaskIntent::ToggleComplete))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_select(task_id: String) -> IntentResponse {
    with_session(|session| session.dispatch_for_task(&task_id, TaskIntent::Select))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_deselect() -> IntentResponse {
    with_session(|session| session.dispatch(TaskIntent::Deselect))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> IntentResponse {
    with_session(|session| session.dispatch_for_task(&task_id, TaskIntent::Delete))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_set_create_open(open: bool) -> IntentResponse {
    with_session(|session| session.dispatch(TaskIntent::SetCreateTaskOpen(open)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_pending() -> Vec<TaskView> {
    with_session(Session::pending_tasks)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_completed() -> Vec<TaskView> {
    with_session(Session::completed_tasks)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_selected() -> Option<TaskView> {
    with_session(Session::selected_task)
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_stats() -> TaskStatsView {
    with_session(Session::task_stats)
}

/// Last task validation message, or empty.
#[flutter_rust_bridge::frb(sync)]
pub fn task_error() -> String {
    with_session(|session| {
        session
            .store
            .state()
            .task
            .error()
            .unwrap_or_default()
            .to_string()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn more_set_search_query(query: String) -> IntentResponse {
    with_session(|session| session.dispatch(MoreIntent::SetSearchQuery(query)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn more_set_show_search(show: bool) -> IntentResponse {
    with_session(|session| session.dispatch(MoreIntent::SetShowSearch(show)))
}

/// Sections to render: filtered while searching, otherwise all.
#[flutter_rust_bridge::frb(sync)]
pub fn more_display_sections() -> Vec<SectionView> {
    with_session(Session::display_sections)
}

#[flutter_rust_bridge::frb(sync)]
pub fn more_has_search_results() -> bool {
    with_session(|session| has_search_results(&session.store.state().more))
}

/// Replaces the feed with records fetched by the host.
#[flutter_rust_bridge::frb(sync)]
pub fn home_hydrate_feed(posts: Vec<FeedPostInput>) -> IntentResponse {
    let posts = posts.into_iter().map(to_feed_post).collect();
    with_session(|session| session.dispatch(HomeIntent::HydrateFeed(posts)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_hydrate_leaderboard(entries: Vec<LeaderboardEntryInput>) -> IntentResponse {
    let entries = entries.into_iter().map(to_leaderboard_entry).collect();
    with_session(|session| session.dispatch(HomeIntent::HydrateLeaderboard(entries)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_hydrate_notifications(notifications: Vec<NotificationInput>) -> IntentResponse {
    let notifications = notifications.into_iter().map(to_notification).collect();
    with_session(|session| session.dispatch(HomeIntent::HydrateNotifications(notifications)))
}

/// Sets the signed-in user used for rank lookups; `None` signs out.
#[flutter_rust_bridge::frb(sync)]
pub fn home_set_current_user(user_id: Option<String>) -> IntentResponse {
    with_session(|session| session.dispatch(HomeIntent::SetCurrentUser(user_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_toggle_like(post_id: String) -> IntentResponse {
    with_session(|session| session.dispatch(HomeIntent::ToggleLike(post_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_mark_notification_read(notification_id: String) -> IntentResponse {
    with_session(|session| session.dispatch(HomeIntent::MarkNotificationRead(notification_id)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_mark_all_notifications_read() -> IntentResponse {
    with_session(|session| session.dispatch(HomeIntent::MarkAllNotificationsRead))
}

#[flutter_rust_bridge::frb(sync)]
pub fn home_stats() -> HomeStatsView {
    with_session(Session::home_stats)
}

/// Store plus the selector caches reading from it.
struct Session {
    store: AppStore,
    selectors: Selectors,
}

impl Session {
    fn new(config: &StoreConfig) -> Self {
        Self {
            store: AppStore::new(config),
            selectors: Selectors::new(config),
        }
    }

    fn dispatch(&mut self, intent: impl Into<Intent>) -> IntentResponse {
        IntentResponse::from_transition(&self.store.dispatch(intent))
    }

    fn dispatch_for_task(
        &mut self,
        raw_id: &str,
        intent: impl FnOnce(Uuid) -> TaskIntent,
    ) -> IntentResponse {
        match Uuid::parse_str(raw_id.trim()) {
            Ok(id) => self.dispatch(intent(id)),
            Err(err) => IntentResponse::invalid("invalid_id", format!("invalid task id: {err}")),
        }
    }

    fn create_task(&mut self, input: TaskDraftInput) -> IntentResponse {
        let priority = match parse_priority(&input.priority) {
            Some(priority) => priority,
            None => {
                return IntentResponse::invalid(
                    "invalid_priority",
                    format!("unsupported priority `{}`", input.priority.trim()),
                );
            }
        };
        let draft = TaskDraft {
            title: input.title,
            description: input.description,
            category: input.category,
            priority,
            due_date: input.due_date,
            due_time: input.due_time,
            tags: input.tags,
        };

        let mut response = self.dispatch(TaskIntent::Create(draft));
        if response.outcome == Transition::Applied.as_str() {
            response.task_id = self
                .store
                .state()
                .task
                .tasks()
                .last()
                .map(|task| task.id.to_string());
        }
        response
    }

    fn update_task(&mut self, raw_id: &str, input: TaskPatchInput) -> IntentResponse {
        let priority = match input.priority.as_deref().map(parse_priority) {
            None => None,
            Some(Some(priority)) => Some(priority),
            Some(None) => {
                return IntentResponse::invalid(
                    "invalid_priority",
                    format!(
                        "unsupported priority `{}`",
                        input.priority.as_deref().unwrap_or_default().trim()
                    ),
                );
            }
        };
        let patch = TaskPatch {
            title: input.title,
            description: input.description,
            category: input.category,
            priority,
            due_date: input.due_date,
            due_time: input.due_time,
            tags: input.tags,
        };
        self.dispatch_for_task(raw_id, |id| TaskIntent::Update { id, patch })
    }

    fn pending_tasks(&mut self) -> Vec<TaskView> {
        let state = self.store.snapshot();
        let tasks = self.selectors.task.pending_tasks(&state.task);
        tasks.iter().map(|task| to_task_view(task)).collect()
    }

    fn completed_tasks(&mut self) -> Vec<TaskView> {
        let state = self.store.snapshot();
        let tasks = self.selectors.task.completed_tasks(&state.task);
        tasks.iter().map(|task| to_task_view(task)).collect()
    }

    fn selected_task(&mut self) -> Option<TaskView> {
        let state = self.store.snapshot();
        self.selectors
            .task
            .selected_task(&state.task)
            .map(|task| to_task_view(&task))
    }

    fn task_stats(&mut self) -> TaskStatsView {
        let state = self.store.snapshot();
        to_task_stats_view(&self.selectors.task.task_stats(&state.task))
    }

    fn display_sections(&mut self) -> Vec<SectionView> {
        let state = self.store.snapshot();
        let sections = self.selectors.more.display_sections(&state.more);
        sections.iter().map(to_section_view).collect()
    }

    fn home_stats(&mut self) -> HomeStatsView {
        let state = self.store.snapshot();
        to_home_stats_view(&self.selectors.home.home_stats(&state.home))
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> T {
    let session = SESSION.get_or_init(|| Mutex::new(Session::new(&resolve_store_config())));
    let mut guard: MutexGuard<'_, Session> =
        session.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn resolve_store_config() -> StoreConfig {
    let Ok(raw) = std::env::var(CATALOG_PATH_ENV) else {
        return StoreConfig::default();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return StoreConfig::default();
    }
    match CatalogConfig::from_json_file(trimmed).and_then(StoreConfig::with_catalog) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                "event=catalog_load module=ffi status=fallback reason={}",
                err
            );
            StoreConfig::default()
        }
    }
}

fn parse_priority(raw: &str) -> Option<Priority> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn to_feed_post(input: FeedPostInput) -> FeedPost {
    FeedPost {
        id: input.id,
        author: input.author,
        body: input.body,
        likes: input.likes,
        liked_by_me: input.liked_by_me,
    }
}

fn to_leaderboard_entry(input: LeaderboardEntryInput) -> LeaderboardEntry {
    LeaderboardEntry {
        user_id: input.user_id,
        display_name: input.display_name,
        points: input.points,
    }
}

fn to_notification(input: NotificationInput) -> Notification {
    Notification {
        id: input.id,
        message: input.message,
        read: input.read,
    }
}

fn to_task_view(task: &Task) -> TaskView {
    TaskView {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        category: task.category.clone(),
        priority: task.priority.as_str().to_string(),
        due_date: task.due_date.clone(),
        due_time: task.due_time.clone(),
        tags: task.tags.clone(),
        completed: task.completed,
        is_selected: task.is_selected,
    }
}

fn to_task_stats_view(stats: &TaskStats) -> TaskStatsView {
    TaskStatsView {
        pending_count: saturating_u32(stats.pending_count),
        completed_count: saturating_u32(stats.completed_count),
        progress_percentage: stats.progress_percentage,
        total_tasks: saturating_u32(stats.total_tasks),
    }
}

fn to_section_view(section: &MoreSection) -> SectionView {
    SectionView {
        title: section.title.clone(),
        items: section
            .items
            .iter()
            .map(|item| ItemView {
                id: item.id.clone(),
                title: item.title.clone(),
                icon: item.icon.clone(),
                action: item.action.as_str().to_string(),
                url: item.url.clone(),
                destructive: item.destructive,
            })
            .collect(),
    }
}

fn to_home_stats_view(stats: &HomeStats) -> HomeStatsView {
    HomeStatsView {
        feed_posts: saturating_u32(stats.feed_posts),
        liked_posts: saturating_u32(stats.liked_posts),
        unread_notifications: saturating_u32(stats.unread_notifications),
        current_rank: stats.current_rank.map(saturating_u32),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
