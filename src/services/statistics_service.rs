// src/services/statistics_service.rs
//
// Derived counts for the dashboard and profile views.
// Works purely over the trackers' snapshots; never calls the backend.

use std::sync::Arc;

use crate::domain::{DashboardSummary, ReadingListStatistics};
use crate::services::history_service::HistoryService;
use crate::services::reading_list_service::ReadingListService;

/// Entries shown in each dashboard column
pub const DASHBOARD_LIMIT: usize = 5;

pub struct StatisticsService {
    reading_list: Arc<ReadingListService>,
    history: Arc<HistoryService>,
}

impl StatisticsService {
    pub fn new(reading_list: Arc<ReadingListService>, history: Arc<HistoryService>) -> Self {
        Self {
            reading_list,
            history,
        }
    }

    pub fn reading_list_statistics(&self) -> ReadingListStatistics {
        ReadingListStatistics::from_entries(&self.reading_list.snapshot())
    }

    pub fn dashboard(&self) -> DashboardSummary {
        let entries = self.reading_list.snapshot();

        DashboardSummary {
            statistics: ReadingListStatistics::from_entries(&entries),
            recent_history: self.history.recent(DASHBOARD_LIMIT),
            recently_read: entries.into_iter().take(DASHBOARD_LIMIT).collect(),
        }
    }
}
