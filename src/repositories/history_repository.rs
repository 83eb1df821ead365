// src/repositories/history_repository.rs

use std::sync::Arc;

use super::local_storage_repository::LocalStorage;
use crate::domain::history::{HistoryEntry, ReadingHistory};
use crate::error::AppResult;

/// Local storage namespace of the reading history
pub const HISTORY_STORAGE_KEY: &str = "reading-history";

pub trait HistoryRepository: Send + Sync {
    fn load(&self) -> AppResult<ReadingHistory>;
    fn save(&self, history: &ReadingHistory) -> AppResult<()>;
}

pub struct LocalHistoryRepository {
    storage: Arc<dyn LocalStorage>,
}

impl LocalHistoryRepository {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }
}

impl HistoryRepository for LocalHistoryRepository {
    fn load(&self) -> AppResult<ReadingHistory> {
        match self.storage.get(HISTORY_STORAGE_KEY)? {
            Some(json) => {
                let entries: Vec<HistoryEntry> = serde_json::from_str(&json)?;
                Ok(ReadingHistory::from_entries(entries))
            }
            None => Ok(ReadingHistory::new()),
        }
    }

    fn save(&self, history: &ReadingHistory) -> AppResult<()> {
        let json = serde_json::to_string(history)?;
        self.storage.set(HISTORY_STORAGE_KEY, &json)
    }
}
