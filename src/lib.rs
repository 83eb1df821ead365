// src/lib.rs
// MangaHub - manga reader core
//
// Architecture:
// - Domain-centric: entities, invariants and pure navigation rules
// - Event-driven: services coordinate through a synchronous event bus
// - Local history, remote reading list and bookmarks (read-through snapshots)
// - Application Layer: UI boundary for the Tauri shell

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER & INTEGRATIONS
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    chapter_route,
    extract_chapter_segment,
    resolve_navigation,
    validate_bookmark,
    validate_reading_list_entry,
    // Bookmarks
    Bookmark,
    // Navigation
    ChapterLink,
    ChapterNavigation,
    ChapterNavigationHint,
    // Statistics
    DashboardSummary,
    // History
    HistoryEntry,
    // Identity
    Identity,
    NewBookmark,
    // Reading list
    NewReadingListEntry,
    ReadingHistory,
    ReadingListEntry,
    ReadingListPatch,
    ReadingListStatistics,
    ReadingStatus,
    Session,
    HISTORY_CAPACITY,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BookmarksRefreshed,
    ChapterViewed,
    DomainEvent,
    EventBus,
    EventLogEntry,
    HistoryCleared,
    ReadingListRefreshed,
    SessionChanged,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, get_database_path, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    BookmarkRepository,
    HistoryRepository,
    LocalHistoryRepository,
    LocalSessionRepository,
    LocalStorage,
    ReadingListRepository,
    RemoteBookmarkRepository,
    RemoteReadingListRepository,
    SessionRepository,
    SqliteLocalStorage,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{AppConfig, Clock, SystemClock};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    BookmarkService,
    CatalogService,
    ChapterView,
    HistoryService,
    OpenChapterRequest,
    ReadingListService,
    SessionService,
    SessionSource,
    SignUpResult,
    StatisticsService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};

pub use application::dto;

#[cfg(feature = "desktop")]
pub use application::commands;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    BackendClient, CatalogClient, CatalogSource, ChapterData, IdentityProvider, RowQuery,
    SearchPage, SeriesDetails, SignUpOutcome,
};
