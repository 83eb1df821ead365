pub mod entity;
pub mod invariants;

pub use entity::{Bookmark, NewBookmark};
pub use invariants::{validate_bookmark, validate_chapter_key};
