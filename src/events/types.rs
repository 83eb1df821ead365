// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Identity;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ty, $name:literal) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                $name
            }
        }
    };
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted whenever the current identity changes: sign-in, sign-up with an
/// immediate session, restore on startup, and sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub identity: Option<Identity>,
}

impl SessionChanged {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            identity: Some(identity),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            identity: None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}

impl_domain_event!(SessionChanged, "SessionChanged");

// ============================================================================
// HISTORY EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterViewed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub series_slug: String,
    pub chapter_id: String,
}

impl ChapterViewed {
    pub fn new(series_slug: String, chapter_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            series_slug,
            chapter_id,
        }
    }
}

impl_domain_event!(ChapterViewed, "ChapterViewed");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryCleared {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entries_removed: usize,
}

impl HistoryCleared {
    pub fn new(entries_removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entries_removed,
        }
    }
}

impl_domain_event!(HistoryCleared, "HistoryCleared");

// ============================================================================
// REMOTE TRACKER EVENTS
// ============================================================================

/// Emitted after the bookmark snapshot has been replaced from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarksRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub count: usize,
}

impl BookmarksRefreshed {
    pub fn new(count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            count,
        }
    }
}

impl_domain_event!(BookmarksRefreshed, "BookmarksRefreshed");

/// Emitted after the reading-list snapshot has been replaced from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingListRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub count: usize,
}

impl ReadingListRefreshed {
    pub fn new(count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            count,
        }
    }
}

impl_domain_event!(ReadingListRefreshed, "ReadingListRefreshed");
