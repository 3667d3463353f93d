//! Turns store state into view models and HTML.
//!
//! Nothing here is incremental: every call rebuilds its output from the
//! lists it is handed.

use askama::Template;
use tokio::task::JoinSet;
use tracing::error;

use crate::fetcher::{FeedCard, FeedFetcher};
use crate::models::{Bookmark, Feed};
use crate::notifier::Banner;

pub const BOOKMARK_ICON: &str = "🚀";
pub const EMPTY_FEEDS_PROMPT: &str = "Add an RSS feed to get started.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTile {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub icon: &'static str,
}

impl BookmarkTile {
    /// Where secondary activation of the tile leads: the delete prompt.
    pub fn delete_href(&self) -> String {
        format!("/bookmarks/{}/delete", self.id)
    }
}

pub fn bookmark_tiles(bookmarks: &[Bookmark]) -> Vec<BookmarkTile> {
    bookmarks
        .iter()
        .map(|b| BookmarkTile {
            id: b.id,
            name: b.name.clone(),
            url: b.url.clone(),
            icon: BOOKMARK_ICON,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSection {
    Placeholder,
    Cards(Vec<FeedCard>),
}

impl FeedSection {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, FeedSection::Placeholder)
    }

    pub fn cards(&self) -> &[FeedCard] {
        match self {
            FeedSection::Placeholder => &[],
            FeedSection::Cards(cards) => cards,
        }
    }
}

/// Fetches every feed concurrently. Cards come back in completion order,
/// and one feed failing has no effect on the others.
pub async fn feed_section(fetcher: &FeedFetcher, feeds: Vec<Feed>) -> FeedSection {
    if feeds.is_empty() {
        return FeedSection::Placeholder;
    }

    let mut tasks = JoinSet::new();
    let count = feeds.len();
    for feed in feeds {
        let fetcher = fetcher.clone();
        tasks.spawn(async move { fetcher.fetch_card(feed).await });
    }

    let mut cards = Vec::with_capacity(count);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(card) => cards.push(card),
            Err(e) => error!("Feed task did not complete: {}", e),
        }
    }

    FeedSection::Cards(cards)
}

/// State of the add-bookmark modal and its form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkModal {
    pub open: bool,
    pub name: String,
    pub url: String,
}

impl BookmarkModal {
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardPage {
    pub tiles: Vec<BookmarkTile>,
    pub feeds: FeedSection,
    pub modal: BookmarkModal,
    pub feed_url: String,
    pub banner: Option<Banner>,
    pub placeholder: &'static str,
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeletePage {
    pub bookmark_id: i64,
    pub prompt: String,
}
