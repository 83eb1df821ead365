use super::entity::NewBookmark;
use crate::domain::{DomainError, DomainResult};

/// Validates a bookmark before it is written
pub fn validate_bookmark(bookmark: &NewBookmark) -> DomainResult<()> {
    validate_chapter_key(&bookmark.series_slug, &bookmark.chapter_id)?;
    validate_page(bookmark.page)?;
    Ok(())
}

/// Both halves of the (series, chapter) key must be present
pub fn validate_chapter_key(series_slug: &str, chapter_id: &str) -> DomainResult<()> {
    if series_slug.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Series slug cannot be empty".to_string(),
        ));
    }
    if chapter_id.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Chapter id cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Pages are 1-based
fn validate_page(page: u32) -> DomainResult<()> {
    if page == 0 {
        return Err(DomainError::InvalidPage(page));
    }
    Ok(())
}

/// Bookmark invariants:
///
/// 1. At most one bookmark per (owner, series, chapter)
/// 2. Page numbers start at 1
/// 3. id and created_at are assigned by the store, never locally

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn bookmark(slug: &str, chapter: &str, page: u32) -> NewBookmark {
        NewBookmark {
            owner_id: Uuid::new_v4(),
            series_slug: slug.to_string(),
            chapter_id: chapter.to_string(),
            page,
        }
    }

    #[test]
    fn test_valid_bookmark() {
        assert!(validate_bookmark(&bookmark("tower-of-god", "chapter-3", 3)).is_ok());
    }

    #[test]
    fn test_page_zero_fails() {
        assert!(matches!(
            validate_bookmark(&bookmark("tower-of-god", "chapter-3", 0)),
            Err(DomainError::InvalidPage(0))
        ));
    }

    #[test]
    fn test_blank_chapter_fails() {
        assert!(validate_bookmark(&bookmark("tower-of-god", "  ", 1)).is_err());
    }
}
