//! Statistics built on top of derived collections.
//!
//! Every function here is a pure function of its arguments; caching is the
//! job of the selector layer.

use crate::model::home::LeaderboardEntry;
use crate::model::more::MoreSection;
use serde::Serialize;
use std::cmp::Ordering;

/// Task progress summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub pending_count: usize,
    pub completed_count: usize,
    /// `0..=100`, rounded half up.
    pub progress_percentage: u32,
    pub total_tasks: usize,
}

impl TaskStats {
    /// Builds stats from the sizes of the pending/completed partitions.
    pub fn from_partitions(pending_count: usize, completed_count: usize) -> Self {
        let total_tasks = pending_count + completed_count;
        Self {
            pending_count,
            completed_count,
            progress_percentage: progress_percentage(completed_count, total_tasks),
            total_tasks,
        }
    }
}

/// `round_half_up(100 * completed / total)`, or 0 for an empty set.
pub fn progress_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    // (2 * 100 * c + t) / (2 * t) == floor(100 * c / t + 1/2)
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(100) as u32
}

/// More screen summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoreStats {
    pub total_sections: usize,
    pub total_items: usize,
    pub quick_actions_count: usize,
}

/// Sum of item counts across sections.
pub fn total_items(sections: &[MoreSection]) -> usize {
    sections.iter().map(|section| section.items.len()).sum()
}

/// Leaderboard row with its competition rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based; tied points share a rank and the next rank is skipped.
    pub rank: usize,
    pub entry: LeaderboardEntry,
}

/// Orders entries by points (desc), display name, then user id, and assigns
/// standard competition ranks (1, 2, 2, 4).
pub fn rank_leaderboard(entries: &[LeaderboardEntry]) -> Vec<RankedEntry> {
    let mut ordered: Vec<&LeaderboardEntry> = entries.iter().collect();
    ordered.sort_by(|left, right| compare_standing(left, right));

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(ordered.len());
    for (index, entry) in ordered.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(previous) if previous.entry.points == entry.points => previous.rank,
            _ => index + 1,
        };
        ranked.push(RankedEntry {
            rank,
            entry: entry.clone(),
        });
    }
    ranked
}

fn compare_standing(left: &LeaderboardEntry, right: &LeaderboardEntry) -> Ordering {
    right
        .points
        .cmp(&left.points)
        .then_with(|| left.display_name.cmp(&right.display_name))
        .then_with(|| left.user_id.cmp(&right.user_id))
}

/// Home screen summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HomeStats {
    pub feed_posts: usize,
    pub liked_posts: usize,
    pub unread_notifications: usize,
    pub current_rank: Option<usize>,
}
