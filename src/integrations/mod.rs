// src/integrations/mod.rs
//
// External Integrations Module
//
// - catalog: search, series details and chapter images
// - backend: managed auth + row storage for reading list and bookmarks

pub mod backend;
pub mod catalog;

pub use backend::{BackendClient, IdentityProvider, RowQuery, SignUpOutcome};
pub use catalog::{CatalogClient, CatalogSource, ChapterData, SearchPage, SeriesDetails};
