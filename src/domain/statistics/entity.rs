use serde::{Deserialize, Serialize};

use crate::domain::history::HistoryEntry;
use crate::domain::reading_list::{ReadingListEntry, ReadingStatus};

/// Per-status counts over a reading list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingListStatistics {
    pub total: u32,
    pub reading: u32,
    pub completed: u32,
    pub plan_to_read: u32,
    pub dropped: u32,
}

impl ReadingListStatistics {
    pub fn from_entries(entries: &[ReadingListEntry]) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            stats.total += 1;
            match entry.status {
                ReadingStatus::Reading => stats.reading += 1,
                ReadingStatus::Completed => stats.completed += 1,
                ReadingStatus::PlanToRead => stats.plan_to_read += 1,
                ReadingStatus::Dropped => stats.dropped += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: ReadingStatus) -> u32 {
        match status {
            ReadingStatus::Reading => self.reading,
            ReadingStatus::Completed => self.completed,
            ReadingStatus::PlanToRead => self.plan_to_read,
            ReadingStatus::Dropped => self.dropped,
        }
    }
}

/// What the dashboard shows at a glance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub statistics: ReadingListStatistics,
    pub recent_history: Vec<HistoryEntry>,
    pub recently_read: Vec<ReadingListEntry>,
}
