// src/repositories/bookmark_repository.rs

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bookmark, NewBookmark, Session};
use crate::error::AppResult;
use crate::integrations::{BackendClient, RowQuery};

const TABLE: &str = "bookmarks";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    async fn find(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<Option<Bookmark>>;
    async fn insert(&self, session: &Session, bookmark: &NewBookmark) -> AppResult<()>;
    async fn update_page(&self, session: &Session, series_slug: &str, chapter_id: &str, page: u32) -> AppResult<()>;
    async fn delete(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<()>;
    /// All bookmarks of the session's identity, newest first
    async fn list(&self, session: &Session) -> AppResult<Vec<Bookmark>>;
}

#[derive(Debug, Deserialize)]
struct BookmarkRow {
    id: Uuid,
    user_id: Uuid,
    manga_slug: String,
    chapter: String,
    page: u32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct BookmarkInsert<'a> {
    user_id: Uuid,
    manga_slug: &'a str,
    chapter: &'a str,
    page: u32,
}

#[derive(Debug, Serialize)]
struct BookmarkPageUpdate {
    page: u32,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Bookmark {
            id: row.id,
            owner_id: row.user_id,
            series_slug: row.manga_slug,
            chapter_id: row.chapter,
            page: row.page,
            created_at: row.created_at,
        }
    }
}

pub struct RemoteBookmarkRepository {
    client: Arc<BackendClient>,
}

impl RemoteBookmarkRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    fn key_filter(session: &Session, series_slug: &str, chapter_id: &str) -> RowQuery {
        RowQuery::new()
            .eq("user_id", session.owner_id())
            .eq("manga_slug", series_slug)
            .eq("chapter", chapter_id)
    }
}

#[async_trait]
impl BookmarkRepository for RemoteBookmarkRepository {
    async fn find(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<Option<Bookmark>> {
        let query = Self::key_filter(session, series_slug, chapter_id).limit(1);
        let rows: Vec<BookmarkRow> = self
            .client
            .select(&session.access_token, TABLE, &query)
            .await?;
        Ok(rows.into_iter().next().map(Bookmark::from))
    }

    async fn insert(&self, session: &Session, bookmark: &NewBookmark) -> AppResult<()> {
        let row = BookmarkInsert {
            user_id: bookmark.owner_id,
            manga_slug: &bookmark.series_slug,
            chapter: &bookmark.chapter_id,
            page: bookmark.page,
        };
        self.client.insert(&session.access_token, TABLE, &row).await
    }

    async fn update_page(&self, session: &Session, series_slug: &str, chapter_id: &str, page: u32) -> AppResult<()> {
        let filter = Self::key_filter(session, series_slug, chapter_id);
        self.client
            .update(&session.access_token, TABLE, &filter, &BookmarkPageUpdate { page })
            .await
    }

    async fn delete(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<()> {
        let filter = Self::key_filter(session, series_slug, chapter_id);
        self.client.delete(&session.access_token, TABLE, &filter).await
    }

    async fn list(&self, session: &Session) -> AppResult<Vec<Bookmark>> {
        let query = RowQuery::new()
            .eq("user_id", session.owner_id())
            .order_desc("created_at");
        let rows: Vec<BookmarkRow> = self
            .client
            .select(&session.access_token, TABLE, &query)
            .await?;
        Ok(rows.into_iter().map(Bookmark::from).collect())
    }
}
