// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Ids and timestamps travel as strings
// - Input DTOs are parsed into domain values in the command layer

use serde::{Deserialize, Serialize};

use crate::domain::{
    Bookmark, DashboardSummary, HistoryEntry, Identity, ReadingListEntry,
    ReadingListStatistics, ReadingStatus,
};
use crate::error::AppResult;
use crate::integrations::SeriesDetails;
use crate::services::ChapterView;

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDto {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

// ============================================================================
// HISTORY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub series_slug: String,
    pub title: String,
    pub chapter_id: String,
    pub viewed_at: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordHistoryDto {
    pub series_slug: String,
    pub title: String,
    pub chapter_id: String,
}

// ============================================================================
// BOOKMARK DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkDto {
    pub id: String,
    pub series_slug: String,
    pub chapter_id: String,
    pub page: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddBookmarkDto {
    pub series_slug: String,
    pub chapter_id: String,
    pub page: u32,
}

// ============================================================================
// READING LIST DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingListEntryDto {
    pub id: String,
    pub series_slug: String,
    pub title: String,
    pub status: String,
    pub last_chapter_id: Option<String>,
    pub last_read_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveReadingListEntryDto {
    pub series_slug: String,
    pub title: String,
    pub status: String,
    pub last_chapter_id: Option<String>,
}

/// Parse a status coming from the UI
pub fn parse_status(status: &str) -> AppResult<ReadingStatus> {
    Ok(status.parse::<ReadingStatus>()?)
}

// ============================================================================
// CATALOG DTOs
// ============================================================================

/// Series page: catalog details plus the user's own state for the series
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPageDto {
    pub details: SeriesDetails,
    pub reading_list_entry: Option<ReadingListEntryDto>,
    pub history: Vec<HistoryEntryDto>,
}

/// Reader page: chapter images, neighbours and the saved page, if any
#[derive(Debug, Clone, Serialize)]
pub struct ReaderPageDto {
    pub chapter: ChapterView,
    pub bookmarked_page: Option<u32>,
}

// ============================================================================
// STATISTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    pub statistics: ReadingListStatistics,
    pub recent_history: Vec<HistoryEntryDto>,
    pub recently_read: Vec<ReadingListEntryDto>,
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<Identity> for IdentityDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email,
            created_at: identity.created_at.to_rfc3339(),
        }
    }
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            series_slug: entry.series_slug,
            title: entry.title,
            chapter_id: entry.chapter_id,
            viewed_at: entry.viewed_at_epoch_millis,
        }
    }
}

impl From<Bookmark> for BookmarkDto {
    fn from(bookmark: Bookmark) -> Self {
        Self {
            id: bookmark.id.to_string(),
            series_slug: bookmark.series_slug,
            chapter_id: bookmark.chapter_id,
            page: bookmark.page,
            created_at: bookmark.created_at.to_rfc3339(),
        }
    }
}

impl From<ReadingListEntry> for ReadingListEntryDto {
    fn from(entry: ReadingListEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            series_slug: entry.series_slug,
            title: entry.title,
            status: entry.status.to_string(),
            last_chapter_id: entry.last_chapter_id,
            last_read_at: entry.last_read_at.to_rfc3339(),
        }
    }
}

impl From<DashboardSummary> for DashboardDto {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            statistics: summary.statistics,
            recent_history: summary
                .recent_history
                .into_iter()
                .map(HistoryEntryDto::from)
                .collect(),
            recently_read: summary
                .recently_read
                .into_iter()
                .map(ReadingListEntryDto::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("plan_to_read").unwrap(), ReadingStatus::PlanToRead);
        assert!(matches!(parse_status("paused"), Err(AppError::Domain(_))));
    }

    #[test]
    fn test_reading_list_entry_dto_uses_wire_status() {
        let entry = ReadingListEntry {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            series_slug: "berserk".to_string(),
            title: "Berserk".to_string(),
            status: ReadingStatus::PlanToRead,
            last_chapter_id: None,
            last_read_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        };
        let dto = ReadingListEntryDto::from(entry);
        assert_eq!(dto.status, "plan_to_read");
        assert_eq!(dto.last_read_at, "2024-05-01T00:00:00+00:00");
    }
}
