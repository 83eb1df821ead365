use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::DomainError;

/// User-assigned status of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Reading,
    Completed,
    PlanToRead,
    Dropped,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 4] = [
        ReadingStatus::Reading,
        ReadingStatus::Completed,
        ReadingStatus::PlanToRead,
        ReadingStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "reading",
            ReadingStatus::Completed => "completed",
            ReadingStatus::PlanToRead => "plan_to_read",
            ReadingStatus::Dropped => "dropped",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

/// One series on a user's reading list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingListEntry {
    /// Assigned by the remote store
    pub id: Uuid,

    /// Identity that owns the entry
    pub owner_id: Uuid,

    pub series_slug: String,
    pub title: String,
    pub status: ReadingStatus,
    pub last_chapter_id: Option<String>,

    /// Refreshed on every mutation
    pub last_read_at: DateTime<Utc>,
}

/// Full row written on first status assignment, or on add-or-update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReadingListEntry {
    pub owner_id: Uuid,
    pub series_slug: String,
    pub title: String,
    pub status: ReadingStatus,
    pub last_chapter_id: Option<String>,
    pub last_read_at: DateTime<Utc>,
}

/// Partial update; `None` fields are left untouched.
/// `last_read_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingListPatch {
    pub title: Option<String>,
    pub status: Option<ReadingStatus>,
    pub last_chapter_id: Option<String>,
    pub last_read_at: DateTime<Utc>,
}

impl ReadingListPatch {
    pub fn touch(last_read_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            status: None,
            last_chapter_id: None,
            last_read_at,
        }
    }

    pub fn from_entry(entry: &NewReadingListEntry) -> Self {
        Self {
            title: Some(entry.title.clone()),
            status: Some(entry.status),
            last_chapter_id: entry.last_chapter_id.clone(),
            last_read_at: entry.last_read_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ReadingStatus::ALL {
            assert_eq!(status.as_str().parse::<ReadingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(matches!(
            "on_hold".parse::<ReadingStatus>(),
            Err(DomainError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ReadingStatus::PlanToRead).unwrap();
        assert_eq!(json, "\"plan_to_read\"");
    }
}
