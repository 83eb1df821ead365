// src/services/bookmark_service.rs
//
// Bookmark tracker
//
// Read-through cache over the remote `bookmarks` table. Every mutation is
// followed by a full re-fetch; the snapshot is never patched locally.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{validate_bookmark, validate_chapter_key, Bookmark, NewBookmark};
use crate::error::AppResult;
use crate::events::{BookmarksRefreshed, EventBus, SessionChanged};
use crate::repositories::BookmarkRepository;
use crate::services::session_service::SessionSource;

/// Counts one in-flight fetch for as long as it lives.
/// Loading means the count is non-zero, so overlapping fetches keep the
/// flag up until the last one finishes.
pub(crate) struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    pub(crate) fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }

    pub(crate) fn is_active(in_flight: &AtomicUsize) -> bool {
        in_flight.load(Ordering::SeqCst) > 0
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct BookmarkService {
    bookmark_repo: Arc<dyn BookmarkRepository>,
    sessions: Arc<dyn SessionSource>,
    event_bus: Arc<EventBus>,
    snapshot: Arc<RwLock<Vec<Bookmark>>>,
    loading: AtomicUsize,
}

impl BookmarkService {
    pub fn new(
        bookmark_repo: Arc<dyn BookmarkRepository>,
        sessions: Arc<dyn SessionSource>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            bookmark_repo,
            sessions,
            event_bus,
            snapshot: Arc::new(RwLock::new(Vec::new())),
            loading: AtomicUsize::new(0),
        }
    }

    /// Drop the snapshot when the session ends
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

    /// Save the last-read page of a chapter, updating the existing bookmark
    /// for (series, chapter) when there is one
    pub async fn add(&self, series_slug: &str, chapter_id: &str, page: u32) -> AppResult<Vec<Bookmark>> {
        let session = self.sessions.active_session().await?;
        let bookmark = NewBookmark {
            owner_id: session.owner_id(),
            series_slug: series_slug.to_string(),
            chapter_id: chapter_id.to_string(),
            page,
        };
        validate_bookmark(&bookmark)?;

        match self.bookmark_repo.find(&session, series_slug, chapter_id).await? {
            Some(existing) => {
                log::debug!(
                    "Moving bookmark {}/{} from page {} to {}",
                    series_slug,
                    chapter_id,
                    existing.page,
                    page
                );
                self.bookmark_repo
                    .update_page(&session, series_slug, chapter_id, page)
                    .await?;
            }
            None => {
                log::debug!("Bookmarking {}/{} at page {}", series_slug, chapter_id, page);
                self.bookmark_repo.insert(&session, &bookmark).await?;
            }
        }

        self.fetch_all().await
    }

    /// Delete the bookmark for (series, chapter). Absent bookmarks are not an error.
    pub async fn remove(&self, series_slug: &str, chapter_id: &str) -> AppResult<Vec<Bookmark>> {
        let session = self.sessions.active_session().await?;
        validate_chapter_key(series_slug, chapter_id)?;

        if self
            .bookmark_repo
            .find(&session, series_slug, chapter_id)
            .await?
            .is_some()
        {
            self.bookmark_repo
                .delete(&session, series_slug, chapter_id)
                .await?;
        }

        self.fetch_all().await
    }

    /// Replace the snapshot with the store's bookmarks, newest first
    pub async fn fetch_all(&self) -> AppResult<Vec<Bookmark>> {
        let session = self.sessions.active_session().await?;
        let _loading = LoadingGuard::start(&self.loading);

        let bookmarks = self.bookmark_repo.list(&session).await?;
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = bookmarks.clone();

        self.event_bus.emit(BookmarksRefreshed::new(bookmarks.len()));
        Ok(bookmarks)
    }

    pub fn snapshot(&self) -> Vec<Bookmark> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        LoadingGuard::is_active(&self.loading)
    }

    pub fn bookmark_for(&self, series_slug: &str, chapter_id: &str) -> Option<Bookmark> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|b| b.is_for(series_slug, chapter_id))
            .cloned()
    }
}
