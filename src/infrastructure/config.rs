// src/infrastructure/config.rs
//
// Application configuration
//
// Endpoints and credentials are baked in at build time through `option_env!`
// and may be overridden by the environment at startup.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const DEFAULT_CATALOG_URL: &str = "https://manhwaclan-mauve.vercel.app";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the catalog API (search, series details, chapter images)
    pub catalog_base_url: String,

    /// Base URL of the managed auth + database backend
    pub backend_url: String,

    /// Public (anon) key sent with every backend request
    pub backend_anon_key: String,

    /// Overrides the platform data directory for the local database
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Self {
        let catalog_base_url = std::env::var("MANGAHUB_CATALOG_URL")
            .ok()
            .or_else(|| option_env!("MANGAHUB_CATALOG_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let backend_url = std::env::var("MANGAHUB_BACKEND_URL")
            .ok()
            .or_else(|| option_env!("MANGAHUB_BACKEND_URL").map(str::to_string))
            .unwrap_or_default();
        let backend_anon_key = std::env::var("MANGAHUB_BACKEND_ANON_KEY")
            .ok()
            .or_else(|| option_env!("MANGAHUB_BACKEND_ANON_KEY").map(str::to_string))
            .unwrap_or_default();
        let data_dir = std::env::var("MANGAHUB_DATA_DIR").ok().map(PathBuf::from);

        Self {
            catalog_base_url,
            backend_url,
            backend_anon_key,
            data_dir,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.catalog_base_url.trim().is_empty() {
            return Err(AppError::Validation("MANGAHUB_CATALOG_URL is missing".into()));
        }
        if self.backend_url.trim().is_empty() {
            return Err(AppError::Validation("MANGAHUB_BACKEND_URL is missing".into()));
        }
        if self.backend_anon_key.trim().is_empty() {
            return Err(AppError::Validation(
                "MANGAHUB_BACKEND_ANON_KEY is missing".into(),
            ));
        }
        Ok(())
    }
}
