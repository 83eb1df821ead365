// src/services/catalog_service.rs
//
// Reader service: catalog lookups plus chapter opening.
// Opening a chapter resolves its navigation and records it in history.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{resolve_navigation, validate_chapter_key, ChapterNavigation};
use crate::error::{AppError, AppResult};
use crate::integrations::catalog::models::ChapterImage;
use crate::integrations::{CatalogSource, SearchPage, SeriesDetails};
use crate::services::history_service::HistoryService;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenChapterRequest {
    pub series_slug: String,
    pub chapter_id: String,
    /// Series title as shown in history
    pub title: String,
}

/// Everything the reader view needs for one chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterView {
    pub series_slug: String,
    pub chapter_id: String,
    pub images: Vec<ChapterImage>,
    pub navigation: ChapterNavigation,
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogSource>,
    history: Arc<HistoryService>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogSource>, history: Arc<HistoryService>) -> Self {
        Self { catalog, history }
    }

    pub async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query cannot be empty".to_string()));
        }
        if page == 0 {
            return Err(AppError::Validation("Pages start at 1".to_string()));
        }

        log::debug!("Searching catalog for '{}' (page {})", query, page);
        self.catalog.search(query, page).await
    }

    pub async fn series_details(&self, series_slug: &str) -> AppResult<SeriesDetails> {
        if series_slug.trim().is_empty() {
            return Err(AppError::Validation("Series slug cannot be empty".to_string()));
        }
        self.catalog.series_details(series_slug).await
    }

    pub async fn open_chapter(&self, request: OpenChapterRequest) -> AppResult<ChapterView> {
        validate_chapter_key(&request.series_slug, &request.chapter_id)?;

        let data = self
            .catalog
            .chapter(&request.series_slug, &request.chapter_id)
            .await?;
        if data.images.is_empty() {
            log::warn!(
                "Chapter {}/{} has no images",
                request.series_slug,
                request.chapter_id
            );
            return Err(AppError::NotFound);
        }

        let navigation = resolve_navigation(&request.series_slug, &data.navigation_hint());
        self.history
            .record(&request.series_slug, &request.title, &request.chapter_id)?;

        Ok(ChapterView {
            series_slug: request.series_slug,
            chapter_id: request.chapter_id,
            images: data.images,
            navigation,
        })
    }
}
