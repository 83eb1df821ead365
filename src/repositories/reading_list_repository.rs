// src/repositories/reading_list_repository.rs

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{NewReadingListEntry, ReadingListEntry, ReadingListPatch, ReadingStatus, Session};
use crate::error::AppResult;
use crate::integrations::{BackendClient, RowQuery};

const TABLE: &str = "reading_list";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingListRepository: Send + Sync {
    async fn find(&self, session: &Session, series_slug: &str) -> AppResult<Option<ReadingListEntry>>;
    async fn insert(&self, session: &Session, entry: &NewReadingListEntry) -> AppResult<()>;
    async fn update(&self, session: &Session, series_slug: &str, patch: &ReadingListPatch) -> AppResult<()>;
    async fn delete(&self, session: &Session, series_slug: &str) -> AppResult<()>;
    /// All entries of the session's identity, most recently read first
    async fn list(&self, session: &Session) -> AppResult<Vec<ReadingListEntry>>;
}

#[derive(Debug, Deserialize)]
struct ReadingListRow {
    id: Uuid,
    user_id: Uuid,
    manga_slug: String,
    title: String,
    status: ReadingStatus,
    #[serde(default)]
    last_chapter: Option<String>,
    last_read: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ReadingListInsert<'a> {
    user_id: Uuid,
    manga_slug: &'a str,
    title: &'a str,
    status: ReadingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_chapter: Option<&'a str>,
    last_read: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ReadingListUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<ReadingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_chapter: Option<&'a str>,
    last_read: DateTime<Utc>,
}

impl<'a> From<&'a ReadingListPatch> for ReadingListUpdate<'a> {
    fn from(patch: &'a ReadingListPatch) -> Self {
        ReadingListUpdate {
            title: patch.title.as_deref(),
            status: patch.status,
            last_chapter: patch.last_chapter_id.as_deref(),
            last_read: patch.last_read_at,
        }
    }
}

impl From<ReadingListRow> for ReadingListEntry {
    fn from(row: ReadingListRow) -> Self {
        ReadingListEntry {
            id: row.id,
            owner_id: row.user_id,
            series_slug: row.manga_slug,
            title: row.title,
            status: row.status,
            last_chapter_id: row.last_chapter,
            last_read_at: row.last_read,
        }
    }
}

pub struct RemoteReadingListRepository {
    client: Arc<BackendClient>,
}

impl RemoteReadingListRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    fn key_filter(session: &Session, series_slug: &str) -> RowQuery {
        RowQuery::new()
            .eq("user_id", session.owner_id())
            .eq("manga_slug", series_slug)
    }
}

#[async_trait]
impl ReadingListRepository for RemoteReadingListRepository {
    async fn find(&self, session: &Session, series_slug: &str) -> AppResult<Option<ReadingListEntry>> {
        let query = Self::key_filter(session, series_slug).limit(1);
        let rows: Vec<ReadingListRow> = self
            .client
            .select(&session.access_token, TABLE, &query)
            .await?;
        Ok(rows.into_iter().next().map(ReadingListEntry::from))
    }

    async fn insert(&self, session: &Session, entry: &NewReadingListEntry) -> AppResult<()> {
        let row = ReadingListInsert {
            user_id: entry.owner_id,
            manga_slug: &entry.series_slug,
            title: &entry.title,
            status: entry.status,
            last_chapter: entry.last_chapter_id.as_deref(),
            last_read: entry.last_read_at,
        };
        self.client.insert(&session.access_token, TABLE, &row).await
    }

    async fn update(&self, session: &Session, series_slug: &str, patch: &ReadingListPatch) -> AppResult<()> {
        let filter = Self::key_filter(session, series_slug);
        let body = ReadingListUpdate::from(patch);
        self.client
            .update(&session.access_token, TABLE, &filter, &body)
            .await
    }

    async fn delete(&self, session: &Session, series_slug: &str) -> AppResult<()> {
        let filter = Self::key_filter(session, series_slug);
        self.client.delete(&session.access_token, TABLE, &filter).await
    }

    async fn list(&self, session: &Session) -> AppResult<Vec<ReadingListEntry>> {
        let query = RowQuery::new()
            .eq("user_id", session.owner_id())
            .order_desc("last_read");
        let rows: Vec<ReadingListRow> = self
            .client
            .select(&session.access_token, TABLE, &query)
            .await?;
        Ok(rows.into_iter().map(ReadingListEntry::from).collect())
    }
}
