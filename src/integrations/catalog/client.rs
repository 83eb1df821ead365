// src/integrations/catalog/client.rs
//
// Catalog API Integration
//
// ARCHITECTURE:
// - REST client for the upstream catalog (search, series, chapter images)
// - Returns DTOs that services can combine (NO tracker state here)
// - Used by CatalogService
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Page tokens from the upstream are passed through untouched
// - Failures are never retried

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;

use super::models::{ChapterData, SearchPage, SeriesDetails};
use crate::error::{AppError, AppResult};

const SERVICE_NAME: &str = "Catalog";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage>;
    async fn series_details(&self, series_slug: &str) -> AppResult<SeriesDetails>;
    async fn chapter(&self, series_slug: &str, chapter_id: &str) -> AppResult<ChapterData>;
}

/// Catalog API Client
#[derive(Clone, Debug)]
pub struct CatalogClient {
    base_url: Url,
    http_client: Client,
}

impl CatalogClient {
    /// Create a new client for the catalog at `base_url`
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into();
        log::debug!("creating CatalogClient for {}", base_url);

        let base_url = Url::parse(&base_url)
            .map_err(|e| AppError::Validation(format!("Invalid catalog URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "Catalog URL '{}' cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Validation(format!("Catalog URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn search_url(&self) -> AppResult<Url> {
        self.url(&["api", "search"])
    }

    fn series_url(&self, series_slug: &str) -> AppResult<Url> {
        self.url(&["manga", series_slug])
    }

    fn chapter_url(&self, series_slug: &str, chapter_id: &str) -> AppResult<Url> {
        self.url(&["manga", series_slug, chapter_id])
    }

    async fn get_json<T>(&self, url: Url, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        if !status.is_success() {
            return Err(AppError::Remote {
                service: SERVICE_NAME,
                status: status.as_u16(),
                message: format!("GET {} failed", url),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet: String = body.chars().take(500).collect();
            log::error!("failed to parse catalog response from {}: {} (body: {})", url, e, snippet);
            AppError::Serialization(e)
        })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    /// GET /api/search?s=query&page=n
    async fn search(&self, query: &str, page: u32) -> AppResult<SearchPage> {
        let url = self.search_url()?;
        log::debug!("GET {} s={} page={}", url, query, page);
        self.get_json(url, &[("s", query.to_string()), ("page", page.to_string())])
            .await
    }

    /// GET /manga/{slug}
    async fn series_details(&self, series_slug: &str) -> AppResult<SeriesDetails> {
        let url = self.series_url(series_slug)?;
        log::debug!("GET {}", url);
        self.get_json(url, &[]).await
    }

    /// GET /manga/{slug}/{chapter}
    async fn chapter(&self, series_slug: &str, chapter_id: &str) -> AppResult<ChapterData> {
        let url = self.chapter_url(series_slug, chapter_id)?;
        log::debug!("GET {}", url);
        self.get_json(url, &[]).await
    }
}
