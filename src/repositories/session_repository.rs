// src/repositories/session_repository.rs

use std::sync::Arc;

use super::local_storage_repository::LocalStorage;
use crate::domain::Session;
use crate::error::AppResult;

/// Local storage namespace of the persisted auth session
pub const SESSION_STORAGE_KEY: &str = "auth-session";

pub trait SessionRepository: Send + Sync {
    fn load(&self) -> AppResult<Option<Session>>;
    fn save(&self, session: &Session) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

pub struct LocalSessionRepository {
    storage: Arc<dyn LocalStorage>,
}

impl LocalSessionRepository {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }
}

impl SessionRepository for LocalSessionRepository {
    fn load(&self) -> AppResult<Option<Session>> {
        match self.storage.get(SESSION_STORAGE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set(SESSION_STORAGE_KEY, &json)
    }

    fn clear(&self) -> AppResult<()> {
        self.storage.remove(SESSION_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::Identity;
    use crate::repositories::SqliteLocalStorage;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_save_load_clear() {
        let (_dir, pool) = create_test_pool();
        let repo = LocalSessionRepository::new(Arc::new(SqliteLocalStorage::new(Arc::new(pool))));
        let session = Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            identity: Identity {
                id: Uuid::new_v4(),
                email: "reader@example.com".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            },
        };

        assert_eq!(repo.load().unwrap(), None);
        repo.save(&session).unwrap();
        assert_eq!(repo.load().unwrap(), Some(session));
        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }
}
