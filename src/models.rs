use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A saved link shown as a tile on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// An RSS subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Feed {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Request body for `POST /api/bookmarks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub name: String,
    pub url: String,
}

/// Request body for `POST /api/feeds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeed {
    pub name: String,
    pub url: String,
}

/// One article preview pulled out of a feed document. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}
