pub mod entity;

pub use entity::{HistoryEntry, ReadingHistory, HISTORY_CAPACITY};
