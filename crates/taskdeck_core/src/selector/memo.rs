//! Identity-keyed memoization cache.
//!
//! # Invariants
//! - A cached value is returned only when every input is the *same* object
//!   (`Arc::ptr_eq`), never merely an equal one.
//! - Entries retain their input `Arc`s, so an address cannot be recycled
//!   while it is still used as a key.
//! - At most `capacity` entries are kept; the least recently used is evicted.

use std::collections::VecDeque;
use std::sync::Arc;

/// Input identity comparison used as a memo key.
pub trait MemoKey: Clone {
    /// Returns whether `self` and `other` denote the same inputs.
    fn same_as(&self, other: &Self) -> bool;
}

impl<T: ?Sized> MemoKey for Arc<T> {
    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: MemoKey> MemoKey for Option<T> {
    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => left.same_as(right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1)
    }
}

impl<A: MemoKey, B: MemoKey, C: MemoKey> MemoKey for (A, B, C) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0) && self.1.same_as(&other.1) && self.2.same_as(&other.2)
    }
}

impl<A: MemoKey, B: MemoKey, C: MemoKey, D: MemoKey> MemoKey for (A, B, C, D) {
    fn same_as(&self, other: &Self) -> bool {
        self.0.same_as(&other.0)
            && self.1.same_as(&other.1)
            && self.2.same_as(&other.2)
            && self.3.same_as(&other.3)
    }
}

/// Hit/miss counters of one memo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Small LRU of `(inputs, output)` pairs.
#[derive(Debug)]
pub struct Memo<K, V> {
    capacity: usize,
    // Front is most recently used.
    entries: VecDeque<(K, V)>,
    stats: MemoStats,
}

impl<K: MemoKey, V: Clone> Memo<K, V> {
    /// Creates an empty memo; `capacity` is clamped to at least one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            stats: MemoStats::default(),
        }
    }

    /// Returns the cached output for `key`, computing and caching it on miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(position) = self.entries.iter().position(|(cached, _)| cached.same_as(&key)) {
            if let Some(entry) = self.entries.remove(position) {
                self.stats.hits += 1;
                let value = entry.1.clone();
                self.entries.push_front(entry);
                return value;
            }
        }

        self.stats.misses += 1;
        let value = compute(&key);
        self.entries.push_front((key, value.clone()));
        self.entries.truncate(self.capacity);
        value
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached entry; counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
