//! The dashboard: both stores, the feed fetcher, the notifier and the
//! page's form state, driven by an explicit table of user actions.

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::backend::BackendClient;
use crate::fetcher::FeedFetcher;
use crate::notifier::Notifier;
use crate::render::{
    bookmark_tiles, feed_section, BookmarkModal, ConfirmDeletePage, DashboardPage,
    EMPTY_FEEDS_PROMPT,
};
use crate::store::{delete_prompt, BookmarkStore, Confirm, FeedStore};

/// Everything a user can do on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenBookmarkModal,
    /// Closing also resets the form.
    CloseBookmarkModal,
    SubmitBookmark { name: String, url: String },
    SubmitFeed { url: String, name: Option<String> },
    /// Secondary activation on a bookmark tile.
    DeleteBookmark { id: i64 },
    DeleteFeed { id: i64 },
}

pub struct Dashboard {
    bookmarks: BookmarkStore,
    feeds: FeedStore,
    fetcher: FeedFetcher,
    notifier: Notifier,
    modal: RwLock<BookmarkModal>,
    feed_url: RwLock<String>,
}

impl Dashboard {
    pub fn new(backend: BackendClient, fetcher: FeedFetcher, notifier: Notifier) -> Self {
        Self {
            bookmarks: BookmarkStore::new(backend.clone(), notifier.clone()),
            feeds: FeedStore::new(backend, notifier.clone()),
            fetcher,
            notifier,
            modal: RwLock::new(BookmarkModal::default()),
            feed_url: RwLock::new(String::new()),
        }
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn feeds(&self) -> &FeedStore {
        &self.feeds
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn modal(&self) -> BookmarkModal {
        self.modal.read().await.clone()
    }

    pub async fn feed_url(&self) -> String {
        self.feed_url.read().await.clone()
    }

    /// Page load: both stores refresh from the backend.
    pub async fn start(&self) {
        self.bookmarks.load().await;
        self.feeds.load().await;
    }

    pub async fn dispatch(&self, action: Action, confirm: &dyn Confirm) {
        info!("Dispatching {:?}", action);
        match action {
            Action::OpenBookmarkModal => {
                self.modal.write().await.open = true;
            }
            Action::CloseBookmarkModal => {
                self.modal.write().await.close();
            }
            Action::SubmitBookmark { name, url } => {
                {
                    let mut modal = self.modal.write().await;
                    modal.name = name.clone();
                    modal.url = url.clone();
                }
                if name.is_empty() || url.is_empty() {
                    warn!("Ignoring bookmark submission with an empty field");
                    return;
                }
                if self.bookmarks.create(&name, &url).await {
                    self.modal.write().await.close();
                }
            }
            Action::SubmitFeed { url, name } => {
                *self.feed_url.write().await = url.clone();
                if self.feeds.create(&url, name.as_deref()).await {
                    self.feed_url.write().await.clear();
                }
            }
            Action::DeleteBookmark { id } => match self.bookmarks.find(id).await {
                Some(bookmark) => {
                    self.bookmarks.delete(&bookmark, confirm).await;
                }
                None => warn!("No bookmark with id {} on the page", id),
            },
            Action::DeleteFeed { id } => {
                self.feeds.delete(id).await;
            }
        }
    }

    /// Draws the whole page from current state, re-fetching every feed.
    pub async fn render(&self) -> DashboardPage {
        let tiles = bookmark_tiles(&self.bookmarks.bookmarks().await);
        let feeds = feed_section(&self.fetcher, self.feeds.feeds().await).await;

        DashboardPage {
            tiles,
            feeds,
            modal: self.modal().await,
            feed_url: self.feed_url().await,
            banner: self.notifier.banner().await,
            placeholder: EMPTY_FEEDS_PROMPT,
        }
    }

    /// The yes/no prompt for deleting bookmark `id`, if it is on the page.
    pub async fn confirm_delete_page(&self, id: i64) -> Option<ConfirmDeletePage> {
        let bookmark = self.bookmarks.find(id).await?;
        Some(ConfirmDeletePage {
            bookmark_id: bookmark.id,
            prompt: delete_prompt(&bookmark.name),
        })
    }
}
