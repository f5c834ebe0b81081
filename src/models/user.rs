use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Genre;

/// Genre preferences of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub favorite_genres: Vec<Genre>,
    pub disliked_genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryItem {
    pub content_id: String,
    pub watched_on: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// A user profile; only the seeder writes these
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub preferences: Preferences,
    pub watch_history: Vec<WatchHistoryItem>,
}
