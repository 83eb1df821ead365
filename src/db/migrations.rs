// src/db/migrations.rs
//
// Local schema versioning
//
// Migrations are applied in order, each inside its own transaction, and
// recorded in `schema_version`. A database written by a newer build is
// refused rather than downgraded.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{AppError, AppResult};

/// Ordered (version, sql) pairs. Append only.
const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../schema.sql"))];

fn latest_version() -> i32 {
    MIGRATIONS.last().map(|(version, _)| *version).unwrap_or(0)
}

/// Bring the schema up to the latest version. Safe to call on every start.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AppError::Other(format!(
            "Local database is at schema version {} but this build only knows {}",
            current, latest
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
        apply_migration(conn, *version, sql)?;
        log::info!("Applied local schema version {}", version);
    }

    Ok(())
}

/// 0 on a fresh database
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn apply_migration(conn: &Connection, version: i32, sql: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql).map_err(|e| {
        AppError::Other(format!("Failed to apply schema version {}: {}", version, e))
    })?;
    tx.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    tx.commit()?;
    Ok(())
}

/// Runs SQLite's integrity check
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}
