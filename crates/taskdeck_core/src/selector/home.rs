//! Home slice selectors.

use crate::aggregate::{rank_leaderboard, HomeStats, RankedEntry};
use crate::model::home::Notification;
use crate::selector::memo::Memo;
use crate::store::{FeedList, HomeSlice, LeaderboardList, NotificationList};
use std::sync::Arc;

type RankedList = Arc<Vec<RankedEntry>>;

/// Memoized derivations over a [`HomeSlice`].
#[derive(Debug)]
pub struct HomeSelectors {
    ranked: Memo<LeaderboardList, RankedList>,
    current_rank: Memo<(RankedList, Option<Arc<str>>), Option<RankedEntry>>,
    unread: Memo<NotificationList, usize>,
    stats: Memo<(FeedList, NotificationList, RankedList, Option<Arc<str>>), Arc<HomeStats>>,
}

impl HomeSelectors {
    pub fn new(capacity: usize) -> Self {
        Self {
            ranked: Memo::new(capacity),
            current_rank: Memo::new(capacity),
            unread: Memo::new(capacity),
            stats: Memo::new(capacity),
        }
    }

    /// Leaderboard ordered by points with competition ranks.
    pub fn ranked_leaderboard(&mut self, slice: &HomeSlice) -> RankedList {
        self.ranked
            .get_or_compute(Arc::clone(slice.leaderboard()), |entries| {
                Arc::new(rank_leaderboard(entries))
            })
    }

    /// Ranked row of the signed-in user.
    pub fn current_user_rank(&mut self, slice: &HomeSlice) -> Option<RankedEntry> {
        let ranked = self.ranked_leaderboard(slice);
        let key = (ranked, slice.current_user_id().cloned());
        self.current_rank.get_or_compute(key, |(ranked, user_id)| {
            find_user_row(ranked, user_id.as_deref()).cloned()
        })
    }

    pub fn unread_notifications_count(&mut self, slice: &HomeSlice) -> usize {
        self.unread
            .get_or_compute(Arc::clone(slice.notifications()), |notifications| {
                count_unread(notifications)
            })
    }

    pub fn home_stats(&mut self, slice: &HomeSlice) -> Arc<HomeStats> {
        let key = (
            Arc::clone(slice.feed()),
            Arc::clone(slice.notifications()),
            self.ranked_leaderboard(slice),
            slice.current_user_id().cloned(),
        );
        self.stats
            .get_or_compute(key, |(feed, notifications, ranked, user_id)| {
                Arc::new(HomeStats {
                    feed_posts: feed.len(),
                    liked_posts: feed.iter().filter(|post| post.liked_by_me).count(),
                    unread_notifications: count_unread(notifications),
                    current_rank: find_user_row(ranked, user_id.as_deref()).map(|row| row.rank),
                })
            })
    }
}

fn count_unread(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|item| !item.read).count()
}

fn find_user_row<'a>(ranked: &'a [RankedEntry], user_id: Option<&str>) -> Option<&'a RankedEntry> {
    let user_id = user_id?;
    ranked.iter().find(|row| row.entry.user_id == user_id)
}

#[cfg(test)]
mod tests {
    use super::HomeSelectors;
    use crate::model::home::{LeaderboardEntry, Notification};
    use crate::store::{reduce_home, HomeIntent, HomeSlice};
    use std::sync::Arc;

    fn entry(user_id: &str, points: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: user_id.to_string(),
            display_name: user_id.to_uppercase(),
            points,
        }
    }

    fn hydrated() -> HomeSlice {
        let (slice, _) = reduce_home(
            &HomeSlice::new(),
            HomeIntent::HydrateLeaderboard(vec![entry("ana", 10), entry("me", 30), entry("bo", 30)]),
        );
        let (slice, _) = reduce_home(&slice, HomeIntent::SetCurrentUser(Some("me".into())));
        slice
    }

    #[test]
    fn current_user_rank_resolves_ties() {
        let mut selectors = HomeSelectors::new(1);
        let row = selectors
            .current_user_rank(&hydrated())
            .expect("current user is ranked");
        assert_eq!(row.rank, 1);
        assert_eq!(row.entry.user_id, "me");
    }

    #[test]
    fn unknown_current_user_has_no_rank() {
        let mut selectors = HomeSelectors::new(1);
        let (slice, _) = reduce_home(&hydrated(), HomeIntent::SetCurrentUser(None));
        assert!(selectors.current_user_rank(&slice).is_none());
        assert_eq!(selectors.home_stats(&slice).current_rank, None);
    }

    #[test]
    fn marking_read_updates_unread_count_but_keeps_ranking() {
        let (slice, _) = reduce_home(
            &hydrated(),
            HomeIntent::HydrateNotifications(vec![
                Notification {
                    id: "n1".to_string(),
                    message: "Bo passed you".to_string(),
                    read: false,
                },
                Notification {
                    id: "n2".to_string(),
                    message: "Weekly recap".to_string(),
                    read: false,
                },
            ]),
        );
        let mut selectors = HomeSelectors::new(1);
        assert_eq!(selectors.unread_notifications_count(&slice), 2);
        let ranked_before = selectors.ranked_leaderboard(&slice);

        let (slice, _) = reduce_home(&slice, HomeIntent::MarkNotificationRead("n1".into()));
        assert_eq!(selectors.unread_notifications_count(&slice), 1);
        assert_eq!(selectors.home_stats(&slice).unread_notifications, 1);
        assert!(Arc::ptr_eq(&ranked_before, &selectors.ranked_leaderboard(&slice)));
    }

    #[test]
    fn home_stats_follow_the_current_user_and_reuse_equal_keys() {
        let mut selectors = HomeSelectors::new(2);
        let slice = hydrated();
        let first = selectors.home_stats(&slice);
        assert_eq!(first.current_rank, Some(1));
        assert!(Arc::ptr_eq(&first, &selectors.home_stats(&slice)));

        let (slice, _) = reduce_home(&slice, HomeIntent::SetCurrentUser(Some("ana".into())));
        let switched = selectors.home_stats(&slice);
        assert_eq!(switched.current_rank, Some(3));
        assert_eq!(switched.unread_notifications, 0);
        assert!(!Arc::ptr_eq(&first, &switched));
    }
}
