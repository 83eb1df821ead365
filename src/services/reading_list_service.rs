// src/services/reading_list_service.rs
//
// Reading-list tracker
//
// Same read-through discipline as the bookmark tracker: mutate remotely,
// then re-fetch the whole list. Every mutation refreshes `last_read_at`.

use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{
    validate_reading_list_entry, NewReadingListEntry, ReadingListEntry, ReadingListPatch,
    ReadingStatus,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ReadingListRefreshed, SessionChanged};
use crate::infrastructure::Clock;
use crate::repositories::ReadingListRepository;
use crate::services::bookmark_service::LoadingGuard;
use crate::services::session_service::SessionSource;

pub struct ReadingListService {
    reading_list_repo: Arc<dyn ReadingListRepository>,
    sessions: Arc<dyn SessionSource>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<EventBus>,
    snapshot: Arc<RwLock<Vec<ReadingListEntry>>>,
    loading: AtomicUsize,
}

impl ReadingListService {
    pub fn new(
        reading_list_repo: Arc<dyn ReadingListRepository>,
        sessions: Arc<dyn SessionSource>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            reading_list_repo,
            sessions,
            clock,
            event_bus,
            snapshot: Arc::new(RwLock::new(Vec::new())),
            loading: AtomicUsize::new(0),
        }
    }

    pub fn register_event_handlers(&self) {
        let snapshot = Arc::clone(&self.snapshot);
        self.event_bus.subscribe::<SessionChanged, _>(move |event| {
            if !event.is_signed_in() {
                snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
            }
        });
    }

    /// Create the entry for a series, or overwrite title, status and last
    /// chapter of the existing one
    pub async fn add_or_update(
        &self,
        series_slug: &str,
        title: &str,
        status: ReadingStatus,
        last_chapter_id: Option<&str>,
    ) -> AppResult<Vec<ReadingListEntry>> {
        let session = self.sessions.active_session().await?;
        let entry = NewReadingListEntry {
            owner_id: session.owner_id(),
            series_slug: series_slug.to_string(),
            title: title.to_string(),
            status,
            last_chapter_id: last_chapter_id.map(str::to_string),
            last_read_at: self.clock.now(),
        };
        validate_reading_list_entry(&entry)?;

        match self.reading_list_repo.find(&session, series_slug).await? {
            Some(_) => {
                log::debug!("Updating reading list entry {} -> {}", series_slug, status);
                self.reading_list_repo
                    .update(&session, series_slug, &ReadingListPatch::from_entry(&entry))
                    .await?;
            }
            None => {
                log::debug!("Adding {} to reading list as {}", series_slug, status);
                self.reading_list_repo.insert(&session, &entry).await?;
            }
        }

        self.fetch_all().await
    }

    pub async fn set_status(&self, series_slug: &str, status: ReadingStatus) -> AppResult<Vec<ReadingListEntry>> {
        let patch = ReadingListPatch {
            status: Some(status),
            ..ReadingListPatch::touch(self.clock.now())
        };
        self.apply_patch(series_slug, patch).await
    }

    pub async fn set_last_chapter(&self, series_slug: &str, chapter_id: &str) -> AppResult<Vec<ReadingListEntry>> {
        if chapter_id.trim().is_empty() {
            return Err(AppError::Validation("Chapter id cannot be empty".to_string()));
        }
        let patch = ReadingListPatch {
            last_chapter_id: Some(chapter_id.to_string()),
            ..ReadingListPatch::touch(self.clock.now())
        };
        self.apply_patch(series_slug, patch).await
    }

    pub async fn remove(&self, series_slug: &str) -> AppResult<Vec<ReadingListEntry>> {
        let session = self.sessions.active_session().await?;
        require_slug(series_slug)?;

        self.reading_list_repo.delete(&session, series_slug).await?;
        self.fetch_all().await
    }

    /// Replace the snapshot with the store's entries, most recently read first
    pub async fn fetch_all(&self) -> AppResult<Vec<ReadingListEntry>> {
        let session = self.sessions.active_session().await?;
        let _loading = LoadingGuard::start(&self.loading);

        let entries = self.reading_list_repo.list(&session).await?;
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = entries.clone();

        self.event_bus.emit(ReadingListRefreshed::new(entries.len()));
        Ok(entries)
    }

    pub fn snapshot(&self) -> Vec<ReadingListEntry> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        LoadingGuard::is_active(&self.loading)
    }

    pub fn entry_for(&self, series_slug: &str) -> Option<ReadingListEntry> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|e| e.series_slug == series_slug)
            .cloned()
    }

    /// Partial update of an existing entry. A series that is not on the
    /// list is left untouched.
    async fn apply_patch(&self, series_slug: &str, patch: ReadingListPatch) -> AppResult<Vec<ReadingListEntry>> {
        let session = self.sessions.active_session().await?;
        require_slug(series_slug)?;

        self.reading_list_repo
            .update(&session, series_slug, &patch)
            .await?;
        self.fetch_all().await
    }
}

fn require_slug(series_slug: &str) -> AppResult<()> {
    if series_slug.trim().is_empty() {
        return Err(AppError::Validation("Series slug cannot be empty".to_string()));
    }
    Ok(())
}
