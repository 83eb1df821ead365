// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
//
// Local repositories persist JSON records through `LocalStorage`.
// Remote repositories talk to the backend's row API with the caller's session.

pub mod bookmark_repository;
pub mod history_repository;
pub mod local_storage_repository;
pub mod reading_list_repository;
pub mod session_repository;

#[cfg(test)]
pub(crate) mod fakes;

pub use bookmark_repository::{BookmarkRepository, RemoteBookmarkRepository};
pub use history_repository::{HistoryRepository, LocalHistoryRepository, HISTORY_STORAGE_KEY};
pub use local_storage_repository::{LocalStorage, SqliteLocalStorage};
pub use reading_list_repository::{ReadingListRepository, RemoteReadingListRepository};
pub use session_repository::{LocalSessionRepository, SessionRepository, SESSION_STORAGE_KEY};
