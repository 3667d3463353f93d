//! Client-side copies of the backend's bookmarks and feeds.
//!
//! Each store owns its list and only ever replaces it wholesale from a fresh
//! `GET`. Every mutation is followed by a reload instead of a local patch.
//! Failures never escape: they are logged and posted to the [`Notifier`].

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::backend::BackendClient;
use crate::error::ClientError;
use crate::models::{Bookmark, Feed, NewBookmark, NewFeed};
use crate::notifier::Notifier;

/// Fallback display name for a feed URL without a host segment.
pub const DEFAULT_FEED_NAME: &str = "New Feed";

/// A yes/no question put to the user before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// A confirmation whose answer is already known, e.g. from a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub fn delete_prompt(bookmark_name: &str) -> String {
    format!("Do you want to delete the bookmark for \"{}\"?", bookmark_name)
}

/// Display name for a feed: the segment after `scheme://`, i.e. the host.
pub fn derive_feed_name(url: &str) -> String {
    url.split('/')
        .nth(2)
        .filter(|host| !host.is_empty())
        .unwrap_or(DEFAULT_FEED_NAME)
        .to_string()
}

pub struct BookmarkStore {
    backend: BackendClient,
    notifier: Notifier,
    bookmarks: RwLock<Vec<Bookmark>>,
}

impl BookmarkStore {
    pub fn new(backend: BackendClient, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            bookmarks: RwLock::new(Vec::new()),
        }
    }

    pub async fn bookmarks(&self) -> Vec<Bookmark> {
        self.bookmarks.read().await.clone()
    }

    pub async fn find(&self, id: i64) -> Option<Bookmark> {
        self.bookmarks
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Replaces the list with the backend's. On failure the previous list
    /// is kept.
    pub async fn load(&self) -> bool {
        match self.backend.list_bookmarks().await {
            Ok(bookmarks) => {
                info!("Loaded {} bookmarks", bookmarks.len());
                *self.bookmarks.write().await = bookmarks;
                true
            }
            Err(e) => {
                error!("Failed to load bookmarks from server: {}", e);
                self.notifier
                    .error("Failed to load bookmarks. Please try again.")
                    .await;
                false
            }
        }
    }

    /// Callers must check that both fields are filled in.
    pub async fn create(&self, name: &str, url: &str) -> bool {
        let new = NewBookmark {
            name: name.to_string(),
            url: url.to_string(),
        };

        match self.backend.create_bookmark(&new).await {
            Ok(created) => {
                match created {
                    Some(bookmark) => info!("Created bookmark {} ({})", bookmark.id, bookmark.name),
                    None => info!("Created bookmark {}", new.name),
                }
                self.load().await;
                self.notifier.success("Bookmark added successfully.").await;
                true
            }
            Err(e) => {
                error!("Failed to add bookmark: {}", e);
                self.notifier
                    .error("Failed to add bookmark. Please try again.")
                    .await;
                false
            }
        }
    }

    /// Asks `confirm` first; a denial sends nothing.
    pub async fn delete(&self, bookmark: &Bookmark, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(&delete_prompt(&bookmark.name)) {
            info!("Deletion of bookmark {} declined", bookmark.id);
            return false;
        }

        match self.backend.delete_bookmark(bookmark.id).await {
            Ok(()) => {
                self.load().await;
                self.notifier.success("Bookmark deleted successfully.").await;
                true
            }
            Err(e) => {
                error!("Failed to delete bookmark {}: {}", bookmark.id, e);
                self.notifier
                    .error("Failed to delete bookmark. Please try again.")
                    .await;
                false
            }
        }
    }
}

pub struct FeedStore {
    backend: BackendClient,
    notifier: Notifier,
    feeds: RwLock<Vec<Feed>>,
}

impl FeedStore {
    pub fn new(backend: BackendClient, notifier: Notifier) -> Self {
        Self {
            backend,
            notifier,
            feeds: RwLock::new(Vec::new()),
        }
    }

    pub async fn feeds(&self) -> Vec<Feed> {
        self.feeds.read().await.clone()
    }

    pub async fn load(&self) -> bool {
        match self.backend.list_feeds().await {
            Ok(feeds) => {
                info!("Loaded {} feeds", feeds.len());
                *self.feeds.write().await = feeds;
                true
            }
            Err(e) => {
                error!("Failed to load RSS feeds from server: {}", e);
                self.notifier
                    .error("Failed to load RSS feeds. Please try again.")
                    .await;
                false
            }
        }
    }

    /// Subscribes to `url`. Without a `name`, the URL's host is used.
    pub async fn create(&self, url: &str, name: Option<&str>) -> bool {
        let url = url.trim();
        if url.is_empty() {
            warn!("Rejected empty feed URL");
            self.notifier.error("Please enter a valid URL.").await;
            return false;
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| derive_feed_name(url));
        let new = NewFeed {
            name,
            url: url.to_string(),
        };

        match self.backend.create_feed(&new).await {
            Ok(created) => {
                match created {
                    Some(feed) => info!("Created feed {} ({})", feed.id, feed.name),
                    None => info!("Created feed {}", new.url),
                }
                self.load().await;
                self.notifier.success("RSS feed added successfully.").await;
                true
            }
            Err(e) => {
                error!("Failed to add RSS feed: {}", e);
                let message = match e {
                    ClientError::Transport(_) => {
                        "Failed to add RSS feed. Please try again.".to_string()
                    }
                    other => other.user_message(),
                };
                self.notifier.error(message).await;
                false
            }
        }
    }

    /// Unlike bookmarks, feeds are removed without a confirmation prompt.
    pub async fn delete(&self, id: i64) -> bool {
        match self.backend.delete_feed(id).await {
            Ok(()) => {
                self.load().await;
                self.notifier.success("RSS feed deleted.").await;
                true
            }
            Err(e) => {
                error!("Failed to delete RSS feed {}: {}", id, e);
                self.notifier
                    .error("Failed to delete RSS feed. Please try again.")
                    .await;
                false
            }
        }
    }
}
