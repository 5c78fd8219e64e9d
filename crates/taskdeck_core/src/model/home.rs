//! Home screen model: social feed, leaderboard and notifications.
//!
//! Records arrive from the network collaborator through hydration intents,
//! so ids are the server-issued strings.

use serde::{Deserialize, Serialize};

/// One post in the home feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: String,
    pub author: String,
    pub body: String,
    pub likes: u32,
    #[serde(default)]
    pub liked_by_me: bool,
}

impl FeedPost {
    /// Returns a copy with the local like flipped and the counter adjusted.
    ///
    /// The counter never drops below zero.
    pub fn with_like_toggled(&self) -> Self {
        let liked_by_me = !self.liked_by_me;
        let likes = if liked_by_me {
            self.likes.saturating_add(1)
        } else {
            self.likes.saturating_sub(1)
        };
        Self {
            likes,
            liked_by_me,
            ..self.clone()
        }
    }
}

/// Points standing of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub points: u64,
}

/// In-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
}
