use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Last-read page of one chapter for one identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Assigned by the remote store
    pub id: Uuid,

    /// Identity that owns the bookmark
    pub owner_id: Uuid,

    pub series_slug: String,
    pub chapter_id: String,

    /// 1-based page number
    pub page: u32,

    pub created_at: DateTime<Utc>,
}

/// Bookmark as sent for insertion, before the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub owner_id: Uuid,
    pub series_slug: String,
    pub chapter_id: String,
    pub page: u32,
}

impl Bookmark {
    pub fn is_for(&self, series_slug: &str, chapter_id: &str) -> bool {
        self.series_slug == series_slug && self.chapter_id == chapter_id
    }
}
