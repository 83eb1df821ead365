// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, get_connection, get_database_path, ConnectionPool, PooledConn,
};

pub use migrations::{initialize_database, verify_database_integrity};

#[cfg(test)]
pub(crate) fn create_test_pool() -> (tempfile::TempDir, ConnectionPool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = create_connection_pool(&dir.path().join("test.db")).expect("pool");
    {
        let conn = pool.get().expect("connection");
        initialize_database(&conn).expect("schema");
    }
    (dir, pool)
}
