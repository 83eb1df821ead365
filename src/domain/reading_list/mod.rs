pub mod entity;
pub mod invariants;

pub use entity::{NewReadingListEntry, ReadingListEntry, ReadingListPatch, ReadingStatus};
pub use invariants::validate_reading_list_entry;
