//! Home slice snapshot and reducer: feed, leaderboard and notifications.

use crate::model::home::{FeedPost, LeaderboardEntry, Notification};
use crate::store::Transition;
use std::sync::Arc;

pub type FeedList = Arc<Vec<FeedPost>>;
pub type LeaderboardList = Arc<Vec<LeaderboardEntry>>;
pub type NotificationList = Arc<Vec<Notification>>;

/// Immutable snapshot of the home slice.
#[derive(Debug, Clone, Default)]
pub struct HomeSlice {
    feed: FeedList,
    leaderboard: LeaderboardList,
    notifications: NotificationList,
    current_user_id: Option<Arc<str>>,
    show_notifications: bool,
    loading: bool,
    error: Option<String>,
}

impl HomeSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self) -> &FeedList {
        &self.feed
    }

    pub fn leaderboard(&self) -> &LeaderboardList {
        &self.leaderboard
    }

    pub fn notifications(&self) -> &NotificationList {
        &self.notifications
    }

    /// Leaderboard user id of the signed-in user, if known.
    pub fn current_user_id(&self) -> Option<&Arc<str>> {
        self.current_user_id.as_ref()
    }

    pub fn show_notifications(&self) -> bool {
        self.show_notifications
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Named home slice transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeIntent {
    SetShowNotifications(bool),
    ToggleLike(String),
    MarkNotificationRead(String),
    MarkAllNotificationsRead,
    HydrateFeed(Vec<FeedPost>),
    HydrateLeaderboard(Vec<LeaderboardEntry>),
    HydrateNotifications(Vec<Notification>),
    SetCurrentUser(Option<String>),
    SetLoading(bool),
    ClearError,
}

impl HomeIntent {
    /// Stable intent name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetShowNotifications(_) => "set_show_notifications",
            Self::ToggleLike(_) => "toggle_like",
            Self::MarkNotificationRead(_) => "mark_notification_read",
            Self::MarkAllNotificationsRead => "mark_all_notifications_read",
            Self::HydrateFeed(_) => "hydrate_feed",
            Self::HydrateLeaderboard(_) => "hydrate_leaderboard",
            Self::HydrateNotifications(_) => "hydrate_notifications",
            Self::SetCurrentUser(_) => "set_current_user",
            Self::SetLoading(_) => "set_home_loading",
            Self::ClearError => "clear_home_error",
        }
    }
}

/// Applies one intent to a home snapshot.
pub fn reduce_home(state: &HomeSlice, intent: HomeIntent) -> (HomeSlice, Transition) {
    let keeps_error = matches!(intent, HomeIntent::SetLoading(_));
    let mut next = state.clone();

    let transition = match intent {
        HomeIntent::SetShowNotifications(show) => {
            next.show_notifications = show;
            Transition::Applied
        }
        HomeIntent::ToggleLike(post_id) => toggle_like(&mut next, &post_id),
        HomeIntent::MarkNotificationRead(notification_id) => {
            mark_read(&mut next, &notification_id)
        }
        HomeIntent::MarkAllNotificationsRead => {
            if next.notifications.iter().any(|item| !item.read) {
                let notifications = next
                    .notifications
                    .iter()
                    .map(|item| Notification {
                        read: true,
                        ..item.clone()
                    })
                    .collect();
                next.notifications = Arc::new(notifications);
            }
            Transition::Applied
        }
        HomeIntent::HydrateFeed(posts) => {
            next.feed = Arc::new(posts);
            Transition::Applied
        }
        HomeIntent::HydrateLeaderboard(entries) => {
            next.leaderboard = Arc::new(entries);
            Transition::Applied
        }
        HomeIntent::HydrateNotifications(notifications) => {
            next.notifications = Arc::new(notifications);
            Transition::Applied
        }
        HomeIntent::SetCurrentUser(user_id) => {
            let unchanged = next.current_user_id.as_deref() == user_id.as_deref();
            if !unchanged {
                next.current_user_id = user_id.map(Arc::from);
            }
            Transition::Applied
        }
        HomeIntent::SetLoading(loading) => {
            next.loading = loading;
            Transition::Applied
        }
        HomeIntent::ClearError => Transition::Applied,
    };

    match &transition {
        Transition::Applied if !keeps_error => next.error = None,
        Transition::Rejected(err) => next.error = Some(err.to_string()),
        _ => {}
    }
    (next, transition)
}

fn toggle_like(next: &mut HomeSlice, post_id: &str) -> Transition {
    let Some(index) = next.feed.iter().position(|post| post.id == post_id) else {
        return Transition::NoopNotFound;
    };

    let mut feed = next.feed.as_ref().clone();
    feed[index] = feed[index].with_like_toggled();
    next.feed = Arc::new(feed);
    Transition::Applied
}

fn mark_read(next: &mut HomeSlice, notification_id: &str) -> Transition {
    let Some(index) = next
        .notifications
        .iter()
        .position(|item| item.id == notification_id)
    else {
        return Transition::NoopNotFound;
    };
    if next.notifications[index].read {
        return Transition::Applied;
    }

    let mut notifications = next.notifications.as_ref().clone();
    notifications[index].read = true;
    next.notifications = Arc::new(notifications);
    Transition::Applied
}
