// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const APP_DIR_NAME: &str = "mangahub";
const DATABASE_FILE_NAME: &str = "mangahub.db";

/// Get the database file path
///
/// Path structure: {APP_DATA}/mangahub/mangahub.db, or
/// {data_dir}/mangahub.db when an override is configured.
pub fn get_database_path(data_dir: Option<&Path>) -> AppResult<PathBuf> {
    let app_dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?
            .join(APP_DIR_NAME),
    };

    std::fs::create_dir_all(&app_dir)?;

    Ok(app_dir.join(DATABASE_FILE_NAME))
}

/// Create a connection pool over the database file at `db_path`
///
/// The app is a single desktop process, so the pool stays small.
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
            conn.busy_timeout(Duration::from_millis(5000))?;
            Ok(())
        });

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::debug!("opened local database at {}", db_path.display());
    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Other(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
#[cfg(test)]
pub fn create_test_connection() -> AppResult<rusqlite::Connection> {
    let conn = rusqlite::Connection::open_in_memory()
        .map_err(AppError::Database)?;

    Ok(conn)
}
