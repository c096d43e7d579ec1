//! SQLite layout of an experiment store.

use super::CollectionError;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

pub const SCHEMA_VERSION: i64 = 1;

/// File name of the per-experiment store.
pub const STORE_FILE: &str = "store.sqlite";

pub fn open_or_create(path: &Path) -> Result<Connection, CollectionError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS rows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            table_name TEXT NOT NULL,
            row TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS rows_by_table ON rows(table_name, id);
        ",
    )?;

    match read_version(&conn) {
        None => {
            conn.execute("INSERT INTO schema_version(version) VALUES(?1)", [SCHEMA_VERSION])?;
        }
        Some(version) => check_version(version)?,
    }
    Ok(conn)
}

/// Open an existing store without write access.
pub fn open_read_only(path: &Path) -> Result<Connection, CollectionError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    match read_version(&conn) {
        Some(version) => check_version(version)?,
        None => {
            return Err(CollectionError::UnsupportedSchema { found: 0, expected: SCHEMA_VERSION })
        }
    }
    Ok(conn)
}

fn read_version(conn: &Connection) -> Option<i64> {
    conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0)).ok()
}

fn check_version(version: i64) -> Result<(), CollectionError> {
    if version == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(CollectionError::UnsupportedSchema { found: version, expected: SCHEMA_VERSION })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_or_create_is_idempotent() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(STORE_FILE);
        drop(open_or_create(&path).expect("create"));
        let conn = open_or_create(&path).expect("reopen");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .expect("count");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_rejects_future_schema() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(STORE_FILE);
        let conn = open_or_create(&path).expect("create");
        conn.execute("UPDATE schema_version SET version = 99", []).expect("bump");
        drop(conn);

        assert!(matches!(
            open_read_only(&path),
            Err(CollectionError::UnsupportedSchema { found: 99, .. })
        ));
        assert!(open_or_create(&path).is_err());
    }
}
