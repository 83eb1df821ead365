// src/services/history_service.rs
//
// History tracker (local, on-device, not scoped to identity)

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{validate_chapter_key, HistoryEntry, ReadingHistory};
use crate::error::{AppError, AppResult};
use crate::events::{ChapterViewed, EventBus, HistoryCleared};
use crate::infrastructure::Clock;
use crate::repositories::HistoryRepository;

pub struct HistoryService {
    history_repo: Arc<dyn HistoryRepository>,
    clock: Arc<dyn Clock>,
    event_bus: Arc<EventBus>,
    history: RwLock<ReadingHistory>,
}

impl HistoryService {
    pub fn new(
        history_repo: Arc<dyn HistoryRepository>,
        clock: Arc<dyn Clock>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            history_repo,
            clock,
            event_bus,
            history: RwLock::new(ReadingHistory::new()),
        }
    }

    /// Replace the in-memory history with the persisted one.
    /// An unreadable record is reset to an empty history.
    pub fn load(&self) -> AppResult<usize> {
        let loaded = match self.history_repo.load() {
            Ok(loaded) => loaded,
            Err(AppError::Serialization(e)) => {
                log::warn!("Discarding unreadable reading history: {}", e);
                let empty = ReadingHistory::new();
                self.history_repo.save(&empty)?;
                empty
            }
            Err(e) => return Err(e),
        };
        let count = loaded.len();
        *self.history.write().unwrap_or_else(PoisonError::into_inner) = loaded;
        log::debug!("Loaded {} history entries", count);
        Ok(count)
    }

    /// Record a chapter view.
    ///
    /// The entry is written to storage before the in-memory history is
    /// replaced, so a failed write leaves both unchanged.
    pub fn record(&self, series_slug: &str, title: &str, chapter_id: &str) -> AppResult<HistoryEntry> {
        validate_chapter_key(series_slug, chapter_id)?;

        let entry = HistoryEntry {
            series_slug: series_slug.to_string(),
            title: title.to_string(),
            chapter_id: chapter_id.to_string(),
            viewed_at_epoch_millis: self.clock.now_epoch_millis(),
        };

        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = history.clone();
        updated.push(entry.clone());
        self.history_repo.save(&updated)?;
        *history = updated;
        drop(history);

        self.event_bus.emit(ChapterViewed::new(
            entry.series_slug.clone(),
            entry.chapter_id.clone(),
        ));
        Ok(entry)
    }

    pub fn clear(&self) -> AppResult<()> {
        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        let removed = history.len();
        self.history_repo.save(&ReadingHistory::new())?;
        history.clear();
        drop(history);

        log::info!("Cleared {} history entries", removed);
        self.event_bus.emit(HistoryCleared::new(removed));
        Ok(())
    }

    /// Whole history, most recent first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.read(|history| history.entries().to_vec())
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.read(|history| history.recent(limit))
    }

    pub fn list_recent_for_series(&self, series_slug: &str) -> Vec<HistoryEntry> {
        self.read(|history| history.for_series(series_slug))
    }

    fn read<T>(&self, f: impl FnOnce(&ReadingHistory) -> T) -> T {
        f(&self.history.read().unwrap_or_else(PoisonError::into_inner))
    }
}
