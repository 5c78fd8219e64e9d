use std::sync::Arc;
use taskdeck_core::{
    AppStore, FeedPost, HomeIntent, LeaderboardEntry, Notification, Selectors, Transition,
};

fn post(id: &str, likes: u32) -> FeedPost {
    FeedPost {
        id: id.to_string(),
        author: "ana".to_string(),
        body: format!("post {id}"),
        likes,
        liked_by_me: false,
    }
}

fn entry(user_id: &str, name: &str, points: u64) -> LeaderboardEntry {
    LeaderboardEntry {
        user_id: user_id.to_string(),
        display_name: name.to_string(),
        points,
    }
}

fn notification(id: &str) -> Notification {
    Notification {
        id: id.to_string(),
        message: format!("notice {id}"),
        read: false,
    }
}

#[test]
fn like_toggle_adjusts_counter_and_flag() {
    let mut store = AppStore::default();
    store.dispatch(HomeIntent::HydrateFeed(vec![post("p1", 3), post("p2", 0)]));

    assert_eq!(store.dispatch(HomeIntent::ToggleLike("p1".into())), Transition::Applied);
    let liked = store.state().home.feed()[0].clone();
    assert!(liked.liked_by_me);
    assert_eq!(liked.likes, 4);

    store.dispatch(HomeIntent::ToggleLike("p1".into()));
    assert_eq!(store.state().home.feed()[0], post("p1", 3));

    assert_eq!(
        store.dispatch(HomeIntent::ToggleLike("missing".into())),
        Transition::NoopNotFound
    );
}

#[test]
fn leaderboard_uses_competition_ranking() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(HomeIntent::HydrateLeaderboard(vec![
        entry("u3", "Cleo", 40),
        entry("u1", "Ana", 90),
        entry("u2", "Bo", 90),
        entry("u4", "Dee", 10),
    ]));

    let ranked = selectors.home.ranked_leaderboard(&store.state().home);
    let rows: Vec<(usize, &str)> = ranked
        .iter()
        .map(|row| (row.rank, row.entry.display_name.as_str()))
        .collect();
    assert_eq!(rows, vec![(1, "Ana"), (1, "Bo"), (3, "Cleo"), (4, "Dee")]);
}

#[test]
fn home_stats_tracks_user_rank_and_unread() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(HomeIntent::HydrateFeed(vec![post("p1", 1), post("p2", 2)]));
    store.dispatch(HomeIntent::HydrateLeaderboard(vec![
        entry("me", "Me", 20),
        entry("rival", "Rival", 50),
    ]));
    store.dispatch(HomeIntent::HydrateNotifications(vec![
        notification("n1"),
        notification("n2"),
        notification("n3"),
    ]));
    store.dispatch(HomeIntent::SetCurrentUser(Some("me".into())));
    store.dispatch(HomeIntent::ToggleLike("p2".into()));
    store.dispatch(HomeIntent::MarkNotificationRead("n2".into()));

    let stats = selectors.home.home_stats(&store.state().home);
    assert_eq!(stats.feed_posts, 2);
    assert_eq!(stats.liked_posts, 1);
    assert_eq!(stats.unread_notifications, 2);
    assert_eq!(stats.current_rank, Some(2));

    store.dispatch(HomeIntent::MarkAllNotificationsRead);
    assert_eq!(
        selectors
            .home
            .unread_notifications_count(&store.state().home),
        0
    );
}

#[test]
fn feed_changes_do_not_touch_leaderboard_identity() {
    let mut store = AppStore::default();
    let mut selectors = Selectors::default();
    store.dispatch(HomeIntent::HydrateFeed(vec![post("p1", 0)]));
    store.dispatch(HomeIntent::HydrateLeaderboard(vec![entry("u1", "Ana", 5)]));
    let ranked_before = selectors.home.ranked_leaderboard(&store.state().home);

    store.dispatch(HomeIntent::ToggleLike("p1".into()));
    let ranked_after = selectors.home.ranked_leaderboard(&store.state().home);
    assert!(Arc::ptr_eq(&ranked_before, &ranked_after));
}

#[test]
fn missing_notification_is_noop() {
    let mut store = AppStore::default();
    store.dispatch(HomeIntent::HydrateNotifications(vec![notification("n1")]));
    let before = store.snapshot();

    assert_eq!(
        store.dispatch(HomeIntent::MarkNotificationRead("nope".into())),
        Transition::NoopNotFound
    );
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}
