pub mod client;
pub mod models;

pub use client::{CatalogClient, CatalogSource};
pub use models::{ChapterData, ChapterImage, ChapterSummary, SearchPage, SearchResult, SeriesDetails};
