use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the reading history
pub const HISTORY_CAPACITY: usize = 100;

/// One viewed chapter
///
/// Keyed by (series_slug, chapter_id). Entries are never patched in place;
/// viewing the same chapter again replaces the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub series_slug: String,
    pub title: String,
    pub chapter_id: String,
    pub viewed_at_epoch_millis: i64,
}

impl HistoryEntry {
    pub fn same_chapter(&self, series_slug: &str, chapter_id: &str) -> bool {
        self.series_slug == series_slug && self.chapter_id == chapter_id
    }
}

/// Most-recent-first list of viewed chapters
///
/// Invariants:
/// 1. At most one entry per (series_slug, chapter_id)
/// 2. Never more than HISTORY_CAPACITY entries
/// 3. Ordered by insertion, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingHistory {
    entries: Vec<HistoryEntry>,
}

impl ReadingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries, re-applying the invariants in case the
    /// stored record was written by something else.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries.into_iter().rev() {
            history.push(entry);
        }
        history
    }

    /// Prepend an entry, dropping any earlier entry for the same chapter
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries
            .retain(|e| !e.same_chapter(&entry.series_slug, &entry.chapter_id));
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Entries of one series, newest first
    pub fn for_series(&self, series_slug: &str) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.series_slug == series_slug)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.viewed_at_epoch_millis.cmp(&a.viewed_at_epoch_millis));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, chapter: &str, at: i64) -> HistoryEntry {
        HistoryEntry {
            series_slug: slug.to_string(),
            title: format!("{} title", slug),
            chapter_id: chapter.to_string(),
            viewed_at_epoch_millis: at,
        }
    }

    #[test]
    fn test_same_chapter_twice_keeps_one_entry_first() {
        let mut history = ReadingHistory::new();
        history.push(entry("solo-leveling", "chapter-1", 1_000));
        history.push(entry("omniscient-reader", "chapter-5", 2_000));
        history.push(entry("solo-leveling", "chapter-1", 3_000));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].series_slug, "solo-leveling");
        assert_eq!(history.entries()[0].viewed_at_epoch_millis, 3_000);
        assert_eq!(history.entries()[1].series_slug, "omniscient-reader");
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let mut history = ReadingHistory::new();
        for i in 0..=HISTORY_CAPACITY {
            history.push(entry("series", &format!("chapter-{}", i), i as i64));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0].chapter_id, "chapter-100");
        assert!(history
            .entries()
            .iter()
            .all(|e| e.chapter_id != "chapter-0"));
    }

    #[test]
    fn test_for_series_filters_and_sorts() {
        let mut history = ReadingHistory::new();
        history.push(entry("a", "chapter-1", 10));
        history.push(entry("b", "chapter-1", 20));
        history.push(entry("a", "chapter-2", 30));

        let a = history.for_series("a");
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].chapter_id, "chapter-2");
        assert_eq!(a[1].chapter_id, "chapter-1");
    }

    #[test]
    fn test_from_entries_preserves_order_and_dedups() {
        let stored = vec![
            entry("a", "chapter-3", 30),
            entry("a", "chapter-2", 20),
            entry("a", "chapter-3", 10),
        ];
        let history = ReadingHistory::from_entries(stored);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].chapter_id, "chapter-3");
        assert_eq!(history.entries()[0].viewed_at_epoch_millis, 30);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = ReadingHistory::new();
        history.push(entry("a", "chapter-1", 1));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["seriesSlug"], "a");
        assert_eq!(json[0]["viewedAtEpochMillis"], 1);
    }
}
