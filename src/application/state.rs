// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::{AppConfig, Clock, SystemClock};
use crate::integrations::{BackendClient, CatalogClient};
use crate::repositories::{
    LocalHistoryRepository, LocalSessionRepository, LocalStorage, RemoteBookmarkRepository,
    RemoteReadingListRepository, SqliteLocalStorage,
};
use crate::services::{
    BookmarkService, CatalogService, HistoryService, ReadingListService, SessionService,
    StatisticsService,
};

/// Application state managed by Tauri.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub session_service: Arc<SessionService>,
    pub history_service: Arc<HistoryService>,
    pub bookmark_service: Arc<BookmarkService>,
    pub reading_list_service: Arc<ReadingListService>,
    pub catalog_service: Arc<CatalogService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Wire repositories, integrations and services over an initialized pool
    pub fn build(config: &AppConfig, pool: Arc<ConnectionPool>) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let backend = Arc::new(BackendClient::new(
            config.backend_url.clone(),
            config.backend_anon_key.clone(),
        )?);
        let catalog = Arc::new(CatalogClient::new(config.catalog_base_url.clone())?);

        // 2. REPOSITORIES
        let storage: Arc<dyn LocalStorage> = Arc::new(SqliteLocalStorage::new(pool));
        let session_repo = Arc::new(LocalSessionRepository::new(storage.clone()));
        let history_repo = Arc::new(LocalHistoryRepository::new(storage));
        let bookmark_repo = Arc::new(RemoteBookmarkRepository::new(backend.clone()));
        let reading_list_repo = Arc::new(RemoteReadingListRepository::new(backend.clone()));

        // 3. SERVICES
        let session_service = Arc::new(SessionService::new(
            backend,
            session_repo,
            clock.clone(),
            event_bus.clone(),
        ));
        let history_service = Arc::new(HistoryService::new(
            history_repo,
            clock.clone(),
            event_bus.clone(),
        ));
        let bookmark_service = Arc::new(BookmarkService::new(
            bookmark_repo,
            session_service.clone(),
            event_bus.clone(),
        ));
        let reading_list_service = Arc::new(ReadingListService::new(
            reading_list_repo,
            session_service.clone(),
            clock,
            event_bus.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(catalog, history_service.clone()));
        let statistics_service = Arc::new(StatisticsService::new(
            reading_list_service.clone(),
            history_service.clone(),
        ));

        // 4. EVENT HANDLER REGISTRATION
        bookmark_service.register_event_handlers();
        reading_list_service.register_event_handlers();

        Ok(Self {
            event_bus,
            session_service,
            history_service,
            bookmark_service,
            reading_list_service,
            catalog_service,
            statistics_service,
        })
    }

    /// Startup sequence: local history, then the persisted session, then the
    /// remote trackers if a session came back
    pub async fn start(&self) -> AppResult<()> {
        self.history_service.load()?;
        if self.session_service.initialize().await?.is_some() {
            self.refresh_remote_trackers().await;
        }
        Ok(())
    }

    /// Fetch bookmarks and reading list for the current identity.
    /// Failures are logged; the views retry on their own fetch.
    pub async fn refresh_remote_trackers(&self) {
        if let Err(e) = self.bookmark_service.fetch_all().await {
            log::warn!("Initial bookmark fetch failed: {}", e);
        }
        if let Err(e) = self.reading_list_service.fetch_all().await {
            log::warn!("Initial reading list fetch failed: {}", e);
        }
    }
}
