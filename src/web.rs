use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use crate::dashboard::{Action, Dashboard};
use crate::store::Answer;

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/bookmarks", post(submit_bookmark))
        .route("/bookmarks/modal/open", post(open_bookmark_modal))
        .route("/bookmarks/modal/close", post(close_bookmark_modal))
        .route(
            "/bookmarks/:id/delete",
            get(confirm_delete_bookmark).post(delete_bookmark),
        )
        .route("/feeds", post(submit_feed))
        .route("/feeds/:id/delete", post(delete_feed))
        .route("/health", get(health))
        .with_state(dashboard)
}

#[derive(Deserialize)]
pub struct BookmarkForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize)]
pub struct FeedForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub confirm: String,
}

impl ConfirmForm {
    pub fn accepted(&self) -> bool {
        self.confirm.eq_ignore_ascii_case("yes")
    }
}

// Route handlers
pub async fn index(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    dashboard.start().await;
    HtmlTemplate(dashboard.render().await)
}

pub async fn open_bookmark_modal(State(dashboard): State<Arc<Dashboard>>) -> Redirect {
    dashboard
        .dispatch(Action::OpenBookmarkModal, &Answer(false))
        .await;
    Redirect::to("/")
}

pub async fn close_bookmark_modal(State(dashboard): State<Arc<Dashboard>>) -> Redirect {
    dashboard
        .dispatch(Action::CloseBookmarkModal, &Answer(false))
        .await;
    Redirect::to("/")
}

pub async fn submit_bookmark(
    State(dashboard): State<Arc<Dashboard>>,
    Form(form): Form<BookmarkForm>,
) -> Redirect {
    dashboard
        .dispatch(
            Action::SubmitBookmark {
                name: form.name,
                url: form.url,
            },
            &Answer(false),
        )
        .await;
    Redirect::to("/")
}

pub async fn confirm_delete_bookmark(
    State(dashboard): State<Arc<Dashboard>>,
    Path(id): Path<i64>,
) -> Response {
    match dashboard.confirm_delete_page(id).await {
        Some(page) => HtmlTemplate(page).into_response(),
        None => Redirect::to("/").into_response(),
    }
}

pub async fn delete_bookmark(
    State(dashboard): State<Arc<Dashboard>>,
    Path(id): Path<i64>,
    Form(form): Form<ConfirmForm>,
) -> Redirect {
    dashboard
        .dispatch(Action::DeleteBookmark { id }, &Answer(form.accepted()))
        .await;
    Redirect::to("/")
}

pub async fn submit_feed(
    State(dashboard): State<Arc<Dashboard>>,
    Form(form): Form<FeedForm>,
) -> Redirect {
    dashboard
        .dispatch(
            Action::SubmitFeed {
                url: form.url,
                name: form.name,
            },
            &Answer(false),
        )
        .await;
    Redirect::to("/")
}

pub async fn delete_feed(
    State(dashboard): State<Arc<Dashboard>>,
    Path(id): Path<i64>,
) -> Redirect {
    dashboard
        .dispatch(Action::DeleteFeed { id }, &Answer(false))
        .await;
    Redirect::to("/")
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
