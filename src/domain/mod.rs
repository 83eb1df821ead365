// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod bookmark;
pub mod history;
pub mod identity;
pub mod navigation;
pub mod reading_list;
pub mod statistics;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Identity
pub use identity::{Identity, Session};

// History (local)
pub use history::{HistoryEntry, ReadingHistory, HISTORY_CAPACITY};

// Bookmarks (remote)
pub use bookmark::{validate_bookmark, validate_chapter_key, Bookmark, NewBookmark};

// Reading list (remote)
pub use reading_list::{
    validate_reading_list_entry, NewReadingListEntry, ReadingListEntry, ReadingListPatch,
    ReadingStatus,
};

// Navigation (pure)
pub use navigation::{
    chapter_route, extract_chapter_segment, resolve_navigation, ChapterLink, ChapterNavigation,
    ChapterNavigationHint,
};

// Statistics (derived data)
pub use statistics::{DashboardSummary, ReadingListStatistics};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Page {0} is not a valid page number")]
    InvalidPage(u32),

    #[error("Unknown reading status: {0}")]
    UnknownStatus(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
