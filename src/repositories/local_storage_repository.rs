// src/repositories/local_storage_repository.rs
//
// Namespaced on-device records (one JSON document per key)

use std::sync::Arc;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::ConnectionPool;
use crate::error::AppResult;

pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

pub struct SqliteLocalStorage {
    pool: Arc<ConnectionPool>,
}

impl SqliteLocalStorage {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl LocalStorage for SqliteLocalStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    #[test]
    fn test_set_get_overwrite_remove() {
        let (_dir, pool) = create_test_pool();
        let storage = SqliteLocalStorage::new(Arc::new(pool));

        assert_eq!(storage.get("reading-history").unwrap(), None);

        storage.set("reading-history", "[]").unwrap();
        storage.set("reading-history", "[1]").unwrap();
        assert_eq!(storage.get("reading-history").unwrap().as_deref(), Some("[1]"));

        storage.remove("reading-history").unwrap();
        assert_eq!(storage.get("reading-history").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let (_dir, pool) = create_test_pool();
        let storage = SqliteLocalStorage::new(Arc::new(pool));
        assert!(storage.remove("nothing-here").is_ok());
    }
}
