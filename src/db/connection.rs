// src/db/connection.rs
//
// r2d2 pools over the journal's SQLite database.
//
// The journal writes from one place at a time, so pools stay small; the
// pragmas below are applied to every connection the pool opens.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

use crate::error::AppResult;

pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const FILE_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

const FILE_POOL_SIZE: u32 = 4;

/// Pool over a database file, creating its directory if needed
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    if let Some(dir) = db_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let manager =
        SqliteConnectionManager::file(db_path).with_init(|conn| conn.execute_batch(FILE_PRAGMAS));

    let pool = Pool::builder().max_size(FILE_POOL_SIZE).build(manager)?;

    log::info!("Journal database opened at {}", db_path.display());
    Ok(pool)
}

/// Pool over a private in-memory database
///
/// Each in-memory SQLite connection is a separate database, so this pool
/// holds exactly one connection and never retires it.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;
    Ok(pool)
}

pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    Ok(pool.get()?)
}
