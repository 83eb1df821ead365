// src/repositories/fakes.rs
//
// In-memory stand-ins for the remote repositories.
// They keep rows per owner so service tests can observe upsert behavior.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{
    Bookmark, NewBookmark, NewReadingListEntry, ReadingListEntry, ReadingListPatch, Session,
};
use crate::error::{AppError, AppResult};

use super::{BookmarkRepository, ReadingListRepository};

#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    rows: Mutex<Vec<Bookmark>>,
    inserted: Mutex<usize>,
    fail_next: Mutex<bool>,
}

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Bookmark> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        *self.inserted.lock().unwrap()
    }

    /// Makes the next call fail with a remote error
    pub fn fail_next_call(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    fn check_failure(&self) -> AppResult<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AppError::Remote {
                service: "backend",
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let offset = *self.inserted.lock().unwrap() as i64;
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(offset)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn find(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<Option<Bookmark>> {
        self.check_failure()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.owner_id == session.owner_id() && b.is_for(series_slug, chapter_id))
            .cloned())
    }

    async fn insert(&self, _session: &Session, bookmark: &NewBookmark) -> AppResult<()> {
        self.check_failure()?;
        let created_at = self.next_timestamp();
        self.rows.lock().unwrap().push(Bookmark {
            id: Uuid::new_v4(),
            owner_id: bookmark.owner_id,
            series_slug: bookmark.series_slug.clone(),
            chapter_id: bookmark.chapter_id.clone(),
            page: bookmark.page,
            created_at,
        });
        *self.inserted.lock().unwrap() += 1;
        Ok(())
    }

    async fn update_page(&self, session: &Session, series_slug: &str, chapter_id: &str, page: u32) -> AppResult<()> {
        self.check_failure()?;
        for row in self.rows.lock().unwrap().iter_mut() {
            if row.owner_id == session.owner_id() && row.is_for(series_slug, chapter_id) {
                row.page = page;
            }
        }
        Ok(())
    }

    async fn delete(&self, session: &Session, series_slug: &str, chapter_id: &str) -> AppResult<()> {
        self.check_failure()?;
        self.rows
            .lock()
            .unwrap()
            .retain(|b| !(b.owner_id == session.owner_id() && b.is_for(series_slug, chapter_id)));
        Ok(())
    }

    async fn list(&self, session: &Session) -> AppResult<Vec<Bookmark>> {
        self.check_failure()?;
        let mut rows: Vec<Bookmark> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.owner_id == session.owner_id())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryReadingListRepository {
    rows: Mutex<Vec<ReadingListEntry>>,
    list_calls: Mutex<usize>,
}

impl InMemoryReadingListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<ReadingListEntry> {
        self.rows.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl ReadingListRepository for InMemoryReadingListRepository {
    async fn find(&self, session: &Session, series_slug: &str) -> AppResult<Option<ReadingListEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.owner_id == session.owner_id() && e.series_slug == series_slug)
            .cloned())
    }

    async fn insert(&self, _session: &Session, entry: &NewReadingListEntry) -> AppResult<()> {
        self.rows.lock().unwrap().push(ReadingListEntry {
            id: Uuid::new_v4(),
            owner_id: entry.owner_id,
            series_slug: entry.series_slug.clone(),
            title: entry.title.clone(),
            status: entry.status,
            last_chapter_id: entry.last_chapter_id.clone(),
            last_read_at: entry.last_read_at,
        });
        Ok(())
    }

    async fn update(&self, session: &Session, series_slug: &str, patch: &ReadingListPatch) -> AppResult<()> {
        for row in self.rows.lock().unwrap().iter_mut() {
            if row.owner_id == session.owner_id() && row.series_slug == series_slug {
                if let Some(title) = &patch.title {
                    row.title = title.clone();
                }
                if let Some(status) = patch.status {
                    row.status = status;
                }
                if let Some(chapter) = &patch.last_chapter_id {
                    row.last_chapter_id = Some(chapter.clone());
                }
                row.last_read_at = patch.last_read_at;
            }
        }
        Ok(())
    }

    async fn delete(&self, session: &Session, series_slug: &str) -> AppResult<()> {
        self.rows
            .lock()
            .unwrap()
            .retain(|e| !(e.owner_id == session.owner_id() && e.series_slug == series_slug));
        Ok(())
    }

    async fn list(&self, session: &Session) -> AppResult<Vec<ReadingListEntry>> {
        *self.list_calls.lock().unwrap() += 1;
        let mut rows: Vec<ReadingListEntry> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner_id == session.owner_id())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.last_read_at.cmp(&a.last_read_at));
        Ok(rows)
    }
}

/// Key/value store backed by a HashMap
#[derive(Default)]
pub struct InMemoryLocalStorage {
    records: Mutex<std::collections::HashMap<String, String>>,
}

impl InMemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl super::LocalStorage for InMemoryLocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}
