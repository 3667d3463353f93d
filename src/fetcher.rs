use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{error, info};

use crate::config::RelayConfig;
use crate::error::ClientError;
use crate::models::{Feed, FeedEntry};
use crate::parser::parse_entries;

/// Retrieves a URL's raw body. The production implementation goes through
/// a public CORS relay; tests substitute a stub.
#[async_trait]
pub trait RawFetch: Send + Sync {
    async fn fetch_raw(&self, url: &Url) -> Result<String, ClientError>;
}

pub struct HttpRelay {
    client: Client,
}

impl HttpRelay {
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("Startpage/1.0 (RSS Reader)")
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RawFetch for HttpRelay {
    async fn fetch_raw(&self, url: &Url) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: None,
            });
        }

        response.text().await.map_err(ClientError::Body)
    }
}

/// Outcome of one feed's fetch-and-parse cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCard {
    /// The relay answered; `entries` may be empty if the body was unusable.
    Articles { feed: Feed, entries: Vec<FeedEntry> },
    /// The relay could not be reached or rejected the request.
    Error { feed: Feed },
}

impl FeedCard {
    pub fn feed(&self) -> &Feed {
        match self {
            FeedCard::Articles { feed, .. } | FeedCard::Error { feed } => feed,
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        match self {
            FeedCard::Articles { entries, .. } => entries,
            FeedCard::Error { .. } => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FeedCard::Error { .. })
    }
}

#[derive(Clone)]
pub struct FeedFetcher {
    relay: Arc<dyn RawFetch>,
    endpoint: Url,
    param: String,
}

impl FeedFetcher {
    pub fn new(relay: Arc<dyn RawFetch>, config: &RelayConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidUrl {
            url: config.endpoint.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            relay,
            endpoint,
            param: config.param.clone(),
        })
    }

    /// The relay request for `feed_url`, which travels percent-encoded in
    /// the configured query parameter.
    pub fn relay_url(&self, feed_url: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(&self.param, feed_url);
        url
    }

    /// Fetches one feed through the relay and turns it into a card. Never
    /// fails: transport and status errors become [`FeedCard::Error`].
    pub async fn fetch_card(&self, feed: Feed) -> FeedCard {
        let url = self.relay_url(&feed.url);
        info!("Fetching feed: {} ({})", feed.name, feed.url);

        match self.relay.fetch_raw(&url).await {
            Ok(body) => {
                let entries = parse_entries(&body);
                info!("Feed '{}' yielded {} entries", feed.name, entries.len());
                FeedCard::Articles { feed, entries }
            }
            Err(e) => {
                error!("Could not fetch feed '{}': {}", feed.name, e);
                FeedCard::Error { feed }
            }
        }
    }
}
