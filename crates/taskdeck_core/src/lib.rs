//! Client-side state and derivation engine for TaskDeck.
//! This crate owns slice snapshots, intent reducers and memoized selectors.

pub mod aggregate;
pub mod config;
pub mod logging;
pub mod model;
pub mod selector;
pub mod store;

pub use aggregate::{progress_percentage, HomeStats, MoreStats, RankedEntry, TaskStats};
pub use config::{CatalogConfig, ConfigError, StoreConfig, DEFAULT_MEMO_CAPACITY};
pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LogLevel, LoggingError,
};
pub use model::home::{FeedPost, LeaderboardEntry, Notification};
pub use model::more::{ItemAction, MoreItem, MoreSection, QuickAction};
pub use model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use model::validation::ValidationError;
pub use selector::{HomeSelectors, MoreSelectors, Selectors, TaskSelectors};
pub use store::{
    AppSnapshot, AppStore, HomeIntent, HomeSlice, Intent, MoreIntent, MoreSlice, SubscriptionId,
    TaskIntent, TaskSlice, Transition,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
