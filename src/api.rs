//! The REST backend: CRUD over bookmarks and feeds, persisted in SQLite.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use crate::db::{is_unique_violation, Database};
use crate::models::{Bookmark, Feed, NewBookmark, NewFeed};

const FEED_EXISTS: &str = "RSS Feed already exists";

pub enum ApiError {
    NotFound(&'static str),
    Conflict(&'static str),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message.to_string()),
            ApiError::Internal(err) => {
                error!("API error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", err))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

pub fn router(db: Arc<Database>) -> Router {
    Router::new()
        .route("/api/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route("/api/bookmarks/:id", delete(delete_bookmark))
        .route("/api/feeds", get(list_feeds).post(create_feed))
        .route("/api/feeds/:id", delete(delete_feed))
        .with_state(db)
}

pub async fn list_bookmarks(
    State(db): State<Arc<Database>>,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    Ok(Json(db.list_bookmarks().await?))
}

pub async fn create_bookmark(
    State(db): State<Arc<Database>>,
    Json(new): Json<NewBookmark>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let bookmark = db.insert_bookmark(&new).await?;
    info!("Stored bookmark {} ({})", bookmark.id, bookmark.url);
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn delete_bookmark(
    State(db): State<Arc<Database>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !db.delete_bookmark(id).await? {
        return Err(ApiError::NotFound("Bookmark not found"));
    }
    info!("Deleted bookmark {}", id);
    Ok(Json(json!({ "message": "Bookmark deleted" })))
}

pub async fn list_feeds(State(db): State<Arc<Database>>) -> Result<Json<Vec<Feed>>, ApiError> {
    Ok(Json(db.list_feeds().await?))
}

pub async fn create_feed(
    State(db): State<Arc<Database>>,
    Json(new): Json<NewFeed>,
) -> Result<(StatusCode, Json<Feed>), ApiError> {
    if db.find_feed_by_url(&new.url).await?.is_some() {
        return Err(ApiError::Conflict(FEED_EXISTS));
    }
    // A concurrent insert can still win between the lookup and this one
    let feed = match db.insert_feed(&new).await {
        Ok(feed) => feed,
        Err(e) if is_unique_violation(&e) => return Err(ApiError::Conflict(FEED_EXISTS)),
        Err(e) => return Err(e.into()),
    };
    info!("Stored feed {} ({})", feed.id, feed.url);
    Ok((StatusCode::CREATED, Json(feed)))
}

pub async fn delete_feed(
    State(db): State<Arc<Database>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !db.delete_feed(id).await? {
        return Err(ApiError::NotFound("RSS Feed not found"));
    }
    info!("Deleted feed {}", id);
    Ok(Json(json!({ "message": "RSS Feed deleted" })))
}
