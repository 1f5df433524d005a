// src/db/migrations.rs
//
// Versioned schema for the journal database.
//
// Each migration is (version, SQL) and runs once, inside its own
// transaction, in ascending order. A database written by a newer build is
// refused rather than guessed at.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{AppError, AppResult};

/// Ordered schema steps; append, never edit
const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../schema.sql"))];

/// Highest version this build understands
pub fn latest_schema_version() -> i32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Bring the schema up to the latest version
///
/// Safe to call on every start.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_schema_version();

    if found > latest {
        return Err(AppError::Other(format!(
            "Journal database is at schema {} but this build only knows {}",
            found, latest
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > found) {
        conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", sql))
            .map_err(|e| {
                let _ = conn.execute_batch("ROLLBACK;");
                AppError::Other(format!("Migration {} failed: {}", version, e))
            })?;
        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("Applied journal schema version {}", version);
    }

    Ok(())
}

/// 0 for a database that has never been initialized
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

/// Run SQLite's integrity check; anything but "ok" is an error
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if verdict == "ok" {
        Ok(())
    } else {
        Err(AppError::Other(format!("Journal database is damaged: {}", verdict)))
    }
}

/// Size and row counts of the journal database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub entry_count: i64,
    pub draft_count: i64,
    pub saved_location_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let count = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    Ok(DatabaseStats {
        size_bytes: count(
            "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
        )?,
        entry_count: count("SELECT COUNT(*) FROM entries")?,
        draft_count: count("SELECT COUNT(*) FROM entries WHERE is_draft = 1")?,
        saved_location_count: count("SELECT COUNT(*) FROM saved_locations")?,
    })
}
