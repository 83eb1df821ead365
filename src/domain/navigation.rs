// src/domain/navigation.rs
//
// Chapter Navigation
//
// The catalog hands back raw previous/next URLs for the chapter being read.
// The only part we trust is a literal "chapter-<digits>" segment; everything
// else in the URL belongs to the upstream site and is ignored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CHAPTER_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chapter-\d+").expect("valid chapter segment regex"));

/// Raw previous/next hints for the chapter currently displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNavigationHint {
    pub previous_chapter_url: Option<String>,
    pub next_chapter_url: Option<String>,
}

/// A resolved neighbour chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterLink {
    pub chapter_id: String,
    pub route: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNavigation {
    pub previous: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

/// Extract the "chapter-<digits>" segment from a hint URL.
///
/// Absent, empty or non-matching hints yield `None`.
pub fn extract_chapter_segment(hint: Option<&str>) -> Option<String> {
    let hint = hint?.trim();
    if hint.is_empty() {
        return None;
    }
    CHAPTER_SEGMENT_RE
        .find(hint)
        .map(|m| m.as_str().to_string())
}

/// Reader route for a chapter of a series
pub fn chapter_route(series_slug: &str, chapter_id: &str) -> String {
    format!("/manga/{}/{}", series_slug, chapter_id)
}

fn resolve_link(series_slug: &str, hint: Option<&str>) -> Option<ChapterLink> {
    extract_chapter_segment(hint).map(|chapter_id| ChapterLink {
        route: chapter_route(series_slug, &chapter_id),
        chapter_id,
    })
}

/// Resolve both neighbours of the current chapter. Never touches the network.
pub fn resolve_navigation(series_slug: &str, hint: &ChapterNavigationHint) -> ChapterNavigation {
    ChapterNavigation {
        previous: resolve_link(series_slug, hint.previous_chapter_url.as_deref()),
        next: resolve_link(series_slug, hint.next_chapter_url.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_chapter_segment() {
        assert_eq!(
            extract_chapter_segment(Some("https://example.org/manga/solo-leveling/chapter-12")),
            Some("chapter-12".to_string())
        );
    }

    #[test]
    fn test_absent_hint_yields_none() {
        assert_eq!(extract_chapter_segment(None), None);
        assert_eq!(extract_chapter_segment(Some("")), None);
        assert_eq!(extract_chapter_segment(Some("   ")), None);
    }

    #[test]
    fn test_without_literal_chapter_prefix_yields_none() {
        assert_eq!(
            extract_chapter_segment(Some("https://example.org/manga/solo-leveling/extra-12")),
            None
        );
        assert_eq!(extract_chapter_segment(Some("https://example.org/chapter-")), None);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            extract_chapter_segment(Some("/manga/x/chapter-7/chapter-8")),
            Some("chapter-7".to_string())
        );
    }

    #[test]
    fn test_resolve_navigation_builds_routes() {
        let hint = ChapterNavigationHint {
            previous_chapter_url: Some("https://example.org/manga/x/chapter-11/".to_string()),
            next_chapter_url: None,
        };
        let nav = resolve_navigation("tower-of-god", &hint);

        let previous = nav.previous.unwrap();
        assert_eq!(previous.chapter_id, "chapter-11");
        assert_eq!(previous.route, "/manga/tower-of-god/chapter-11");
        assert!(nav.next.is_none());
    }
}
