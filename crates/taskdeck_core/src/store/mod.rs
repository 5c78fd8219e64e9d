//! Entity store: immutable slice snapshots and pure intent reducers.
//!
//! # Responsibility
//! - Hold canonical entities and UI-transient fields per slice.
//! - Apply named intents as pure `(snapshot, payload) -> snapshot` functions.
//! - Serialize intent application through one explicitly owned container.
//!
//! # Invariants
//! - Reducers never mutate their input snapshot; collections are shared
//!   through `Arc` and replaced wholesale when they change.
//! - A collection keeps its `Arc` identity across intents that do not touch it.
//! - Validation failures leave canonical data unchanged and set `error`.
//! - Missing-id intents report [`Transition::NoopNotFound`].

mod app_store;
mod home_slice;
mod more_slice;
mod task_slice;

pub use app_store::{reduce, AppSnapshot, AppStore, Intent, SubscriptionId};
pub use home_slice::{reduce_home, FeedList, HomeIntent, HomeSlice, LeaderboardList, NotificationList};
pub use more_slice::{reduce_more, MoreIntent, MoreSlice, QuickActionList, SectionList};
pub use task_slice::{reduce_task, TaskIntent, TaskList, TaskSlice};

use crate::model::validation::ValidationError;

/// Outcome of applying one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The intent was applied and a new snapshot produced.
    Applied,
    /// The addressed entity does not exist; snapshot unchanged.
    NoopNotFound,
    /// Payload failed validation; only the slice `error` field changed.
    Rejected(ValidationError),
}

impl Transition {
    /// Stable snake_case label used in logs and FFI responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::NoopNotFound => "noop_not_found",
            Self::Rejected(_) => "rejected",
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
