//! Connection lifecycle manager for the catalog database.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections exactly once per manager.
//! - Configure connection pragmas required by core behavior.
//! - Ensure the `Library` table exists before returning a usable handle.
//!
//! # Invariants
//! - `open` and `close` are idempotent.
//! - A live connection always has `foreign_keys=ON` and the schema applied.
//! - A failed open leaves the connection unset.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS Library (
    id     INTEGER PRIMARY KEY,
    title  TEXT NOT NULL,
    author TEXT NOT NULL,
    year   INTEGER NOT NULL,
    status TEXT DEFAULT 'in stock'
);";

/// Owns the single catalog connection for the process.
///
/// Constructed once at startup and passed by reference to the repository;
/// the repository never outlives or reopens it.
pub struct DbManager {
    path: PathBuf,
    conn: Option<Connection>,
}

impl DbManager {
    /// Creates a manager for the given database file without opening it.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            conn: None,
        }
    }

    /// Creates a manager backed by an already-open in-memory database.
    ///
    /// Used by tests that need an isolated store per test.
    pub fn open_in_memory() -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode=memory");

        let conn = match Connection::open_in_memory() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match bootstrap_connection(&conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok mode=memory duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self {
                    path: PathBuf::from(":memory:"),
                    conn: Some(conn),
                })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens (or creates) the database file and ensures the schema exists.
    ///
    /// Idempotent: a second call on an open manager is a no-op. On failure
    /// the connection stays unset and the error is returned to the caller.
    ///
    /// # Side effects
    /// - Creates the `Library` table on the first open of a new file.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(&mut self) -> DbResult<()> {
        if self.conn.is_some() {
            return Ok(());
        }

        let started_at = Instant::now();
        info!(
            "event=db_open module=db status=start mode=file path={}",
            self.path.display()
        );

        let conn = match Connection::open(&self.path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match bootstrap_connection(&conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok mode=file duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                self.conn = Some(conn);
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Releases the connection if held. Safe to call when not open.
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            info!("event=db_close module=db status=ok");
        }
    }

    /// Borrows the live connection, or `None` when the manager is not open.
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DbManager;

    #[test]
    fn open_in_memory_creates_schema() {
        let manager = DbManager::open_in_memory().unwrap();
        let conn = manager.connection().unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Library';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn close_is_idempotent() {
        let mut manager = DbManager::open_in_memory().unwrap();
        assert!(manager.is_open());

        manager.close();
        assert!(!manager.is_open());
        manager.close();
        assert!(manager.connection().is_none());
    }

    #[test]
    fn status_column_defaults_to_in_stock() {
        let manager = DbManager::open_in_memory().unwrap();
        let conn = manager.connection().unwrap();

        conn.execute(
            "INSERT INTO Library (title, author, year) VALUES ('T', 'A', 2000);",
            [],
        )
        .unwrap();
        let status: String = conn
            .query_row("SELECT status FROM Library WHERE title = 'T';", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(status, "in stock");
    }
}
