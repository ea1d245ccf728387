//! Queries for the kv_entries table.

use rusqlite::{params, Connection, OptionalExtension};
use shapeguard_core::errors::StorageError;

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, StorageError> {
    conn.query_row(
        "SELECT value FROM kv_entries WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(sqlite_err)
}

/// Insert or replace the value for `key`.
pub fn upsert(conn: &Connection, key: &str, value: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now_secs()],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// Removing a missing key is not an error.
pub fn delete(conn: &Connection, key: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
        .map_err(sqlite_err)?;
    Ok(())
}

pub fn list_keys(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT key FROM kv_entries ORDER BY key")
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<String>, _>>().map_err(sqlite_err)
}

pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))
        .map_err(sqlite_err)
}
