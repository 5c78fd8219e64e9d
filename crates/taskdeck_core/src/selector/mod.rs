//! Derivation engine: memoized selectors over slice snapshots.
//!
//! # Responsibility
//! - Compute filtered lists, lookups and statistics from explicit slice inputs.
//! - Return the same `Arc` for unchanged inputs so consumers can skip work.
//!
//! # Invariants
//! - Selectors never mutate or retain the slices they read, only `Arc`s
//!   cloned from them as memo keys.
//! - Memo hits depend on input identity, not value equality.
//! - Selectors are total: empty collections yield zero-valued results.
//!
//! # See also
//! - `store` for the snapshot identity guarantees selectors rely on.

pub mod home;
pub mod memo;
pub mod more;
pub mod task;

pub use home::HomeSelectors;
pub use memo::{Memo, MemoKey, MemoStats};
pub use more::{
    account_section, community_section, has_search_results, productivity_section,
    section_titled, support_section, tools_section, MoreSelectors,
};
pub use task::TaskSelectors;

use crate::config::StoreConfig;

/// All selector groups sharing one memo capacity.
#[derive(Debug)]
pub struct Selectors {
    pub task: TaskSelectors,
    pub more: MoreSelectors,
    pub home: HomeSelectors,
}

impl Selectors {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_capacity(config.effective_memo_capacity())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            task: TaskSelectors::new(capacity),
            more: MoreSelectors::new(capacity),
            home: HomeSelectors::new(capacity),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}
