use super::entity::NewReadingListEntry;
use crate::domain::{DomainError, DomainResult};

/// Validates a reading list row before it is written
pub fn validate_reading_list_entry(entry: &NewReadingListEntry) -> DomainResult<()> {
    if entry.series_slug.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Series slug cannot be empty".to_string(),
        ));
    }
    if entry.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Reading list title cannot be empty".to_string(),
        ));
    }
    if let Some(chapter) = &entry.last_chapter_id {
        if chapter.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Last chapter cannot be blank when present".to_string(),
            ));
        }
    }
    Ok(())
}

/// Reading list invariants:
///
/// 1. At most one entry per (series_slug, owner)
/// 2. Status is always one of the four known values
/// 3. last_read_at moves forward on every mutation
/// 4. Entries are invisible without a signed-in identity
