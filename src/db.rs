use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::models::{Bookmark, Feed, NewBookmark, NewFeed};

/// Whether `err` is SQLite refusing a duplicate of a `UNIQUE` column.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feeds (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                url TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_bookmarks(&self) -> anyhow::Result<Vec<Bookmark>> {
        let bookmarks =
            sqlx::query_as::<_, Bookmark>("SELECT id, name, url FROM bookmarks ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(bookmarks)
    }

    pub async fn insert_bookmark(&self, new: &NewBookmark) -> anyhow::Result<Bookmark> {
        let now = Utc::now().to_rfc3339();
        let bookmark = sqlx::query_as::<_, Bookmark>(
            r#"
            INSERT INTO bookmarks (name, url, created_at)
            VALUES (?, ?, ?)
            RETURNING id, name, url
            "#,
        )
        .bind(&new.name)
        .bind(&new.url)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;
        Ok(bookmark)
    }

    /// Returns `false` when no bookmark had that id.
    pub async fn delete_bookmark(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_feeds(&self) -> anyhow::Result<Vec<Feed>> {
        let feeds = sqlx::query_as::<_, Feed>("SELECT id, name, url FROM feeds ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(feeds)
    }

    pub async fn find_feed_by_url(&self, url: &str) -> anyhow::Result<Option<Feed>> {
        let feed = sqlx::query_as::<_, Feed>("SELECT id, name, url FROM feeds WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feed)
    }

    pub async fn insert_feed(&self, new: &NewFeed) -> anyhow::Result<Feed> {
        let now = Utc::now().to_rfc3339();
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (name, url, created_at)
            VALUES (?, ?, ?)
            RETURNING id, name, url
            "#,
        )
        .bind(&new.name)
        .bind(&new.url)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;
        Ok(feed)
    }

    /// Returns `false` when no feed had that id.
    pub async fn delete_feed(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM feeds WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
