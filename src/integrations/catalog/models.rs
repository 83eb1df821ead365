// src/integrations/catalog/models.rs
//
// Catalog API payloads. Field names follow the upstream JSON; everything the
// upstream may omit defaults instead of failing the whole response.

use serde::{Deserialize, Serialize};

use crate::domain::ChapterNavigationHint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub latest_chapter: String,
    #[serde(default)]
    pub latest_chapter_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    /// Opaque upstream page tokens, passed through untouched
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetails {
    #[serde(default)]
    pub manga_url: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub chapters: Vec<ChapterSummary>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterImage {
    pub original: String,
    pub proxied: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterData {
    #[serde(default)]
    pub chapter_url: String,
    #[serde(default)]
    pub images: Vec<ChapterImage>,
    #[serde(default)]
    pub prev_chapter: Option<String>,
    #[serde(default)]
    pub next_chapter: Option<String>,
}

impl ChapterData {
    pub fn navigation_hint(&self) -> ChapterNavigationHint {
        ChapterNavigationHint {
            previous_chapter_url: self.prev_chapter.clone(),
            next_chapter_url: self.next_chapter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_deserialize() {
        let json = r#"{
            "results": [{
                "title": "Solo Leveling",
                "url": "https://example.org/manga/solo-leveling/",
                "image": "https://example.org/cover.jpg",
                "status": "Completed",
                "genres": ["Action", "Fantasy"],
                "latest_chapter": "Chapter 200",
                "latest_chapter_url": "https://example.org/manga/solo-leveling/chapter-200/"
            }],
            "currentPage": 1,
            "totalPages": 3,
            "nextPage": "https://example.org/page/2/?s=solo",
            "prevPage": null
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].genres, vec!["Action", "Fantasy"]);
        assert_eq!(page.total_pages, 3);
        assert!(page.next_page.is_some());
        assert!(page.prev_page.is_none());
    }

    #[test]
    fn test_empty_search_page_defaults() {
        let page: SearchPage = serde_json::from_str("{}").unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_series_details_deserialize() {
        let json = r#"{
            "mangaUrl": "https://example.org/manga/solo-leveling/",
            "summary": "A hunter levels up.",
            "status": "Completed",
            "rating": "4.8",
            "rank": "1st",
            "genres": ["Action"],
            "chapters": [
                {"title": "Chapter 2", "url": "https://example.org/manga/solo-leveling/chapter-2/", "date": "May 2, 2024"},
                {"title": "Chapter 1", "url": "https://example.org/manga/solo-leveling/chapter-1/", "date": "May 1, 2024"}
            ]
        }"#;

        let details: SeriesDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.chapters.len(), 2);
        assert_eq!(details.rating, "4.8");
        assert!(details.image.is_none());
    }

    #[test]
    fn test_chapter_navigation_hint() {
        let json = r#"{
            "chapterUrl": "https://example.org/manga/solo-leveling/chapter-2/",
            "images": [{"original": "https://cdn/1.jpg", "proxied": "https://proxy/1.jpg"}],
            "prevChapter": "https://example.org/manga/solo-leveling/chapter-1/",
            "nextChapter": null
        }"#;

        let chapter: ChapterData = serde_json::from_str(json).unwrap();
        let hint = chapter.navigation_hint();
        assert_eq!(chapter.images[0].proxied, "https://proxy/1.jpg");
        assert!(hint.previous_chapter_url.unwrap().ends_with("chapter-1/"));
        assert!(hint.next_chapter_url.is_none());
    }
}
