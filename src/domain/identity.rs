// src/domain/identity.rs
//
// Identity and Session
//
// Both are issued by the external identity provider. Nothing in this crate
// constructs an Identity on its own; it is only ever read back from the
// provider or from a persisted session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Tokens plus the identity they were issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub identity: Identity,
}

impl Session {
    /// True once the access token's expiry has passed.
    /// Sessions without a known expiry are treated as live.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }

    pub fn owner_id(&self) -> Uuid {
        self.identity.id
    }
}
