//! HTTP client for the bookmark/feed REST backend.

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientError;
use crate::models::{Bookmark, Feed, NewBookmark, NewFeed};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .user_agent("Startpage/1.0")
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self { client, base })
    }

    pub async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, ClientError> {
        self.list("api/bookmarks").await
    }

    pub async fn create_bookmark(
        &self,
        new: &NewBookmark,
    ) -> Result<Option<Bookmark>, ClientError> {
        self.create("api/bookmarks", new).await
    }

    pub async fn delete_bookmark(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("api/bookmarks/{}", id)).await
    }

    pub async fn list_feeds(&self) -> Result<Vec<Feed>, ClientError> {
        self.list("api/feeds").await
    }

    pub async fn create_feed(&self, new: &NewFeed) -> Result<Option<Feed>, ClientError> {
        self.create("api/feeds", new).await
    }

    pub async fn delete_feed(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("api/feeds/{}", id)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(|e| ClientError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let response = check_status(response).await?;
        response.json().await.map_err(ClientError::Body)
    }

    /// Success is decided by the status alone. The created row is returned
    /// when the body happens to carry one.
    async fn create<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(ClientError::Body)?;
        match serde_json::from_slice(&bytes) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                debug!("Create response carried no row: {}", e);
                Ok(None)
            }
        }
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turns a non-success response into [`ClientError::Status`], keeping the
/// body's `error` field if it has one.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&server.uri()).unwrap()
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let result = BackendClient::new("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_list_bookmarks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Docs", "url": "https://docs.example.com"}
            ])))
            .mount(&server)
            .await;

        let bookmarks = client_for(&server).await.list_bookmarks().await.unwrap();

        assert_eq!(
            bookmarks,
            vec![Bookmark {
                id: 1,
                name: "Docs".to_string(),
                url: "https://docs.example.com".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_ignores_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feeds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "name": "News", "url": "https://news.example.com/rss", "created_at": "x"}
            ])))
            .mount(&server)
            .await;

        let feeds = client_for(&server).await.list_feeds().await.unwrap();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].id, 4);
    }

    #[tokio::test]
    async fn test_malformed_body_is_body_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/bookmarks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).await.list_bookmarks().await;
        assert!(matches!(result, Err(ClientError::Body(_))));
    }

    #[tokio::test]
    async fn test_create_feed_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/feeds"))
            .and(body_json(json!({"name": "news.example.com", "url": "https://news.example.com/rss"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 7, "name": "news.example.com", "url": "https://news.example.com/rss"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let feed = client_for(&server)
            .await
            .create_feed(&NewFeed {
                name: "news.example.com".to_string(),
                url: "https://news.example.com/rss".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(feed.map(|f| f.id), Some(7));
    }

    #[tokio::test]
    async fn test_create_with_empty_body_still_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/bookmarks"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .await
            .create_bookmark(&NewBookmark {
                name: "Docs".to_string(),
                url: "https://docs.example.com".to_string(),
            })
            .await;

        assert!(matches!(created, Ok(None)));
    }

    #[tokio::test]
    async fn test_error_status_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/feeds"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "RSS Feed already exists"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .create_feed(&NewFeed {
                name: "x".to_string(),
                url: "https://x.example.com".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("RSS Feed already exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_without_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/bookmarks/3"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.delete_bookmark(3).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Status {
                status: 500,
                message: None
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = BackendClient::new(&uri).unwrap();
        let result = client.list_feeds().await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
