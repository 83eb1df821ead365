//! Statistics are derived from the reading list and history snapshots.
//!
//! 1. Statistics are ALWAYS derived, NEVER stored
//! 2. They can be recalculated at any time from the current snapshots
//! 3. Stale statistics are acceptable until the next fetch

pub mod entity;
pub use entity::{DashboardSummary, ReadingListStatistics};
