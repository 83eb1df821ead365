// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services own the in-memory snapshots and the rules that tie repositories,
// integrations and events together. Commands call services, never
// repositories.

pub mod bookmark_service;
pub mod catalog_service;
pub mod history_service;
pub mod reading_list_service;
pub mod session_service;
pub mod statistics_service;

pub use bookmark_service::BookmarkService;

pub use catalog_service::{
    CatalogService,
    ChapterView,
    OpenChapterRequest,
};

pub use history_service::HistoryService;

pub use reading_list_service::ReadingListService;

pub use session_service::{
    SessionService,
    SessionSource,
    SignUpResult,
};

pub use statistics_service::{
    StatisticsService,
    DASHBOARD_LIMIT,
};
