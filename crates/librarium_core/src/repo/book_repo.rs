//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `Library` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Title lookups are exact-match only; no case-folding, no partial match.
//! - Read paths reject invalid persisted status labels instead of masking
//!   them.
//! - A constraint-violated insert is a boolean `false`, not an error.

use crate::db::{DbError, DbManager};
use crate::model::book::{Book, BookStatus};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT id, title, author, year, status FROM Library";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// The storage connection is not open.
    ConnectionUnavailable,
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionUnavailable => write!(f, "storage connection is not open"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConnectionUnavailable => None,
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog CRUD operations.
pub trait BookRepository {
    /// Inserts a record with status left to the schema default.
    ///
    /// Returns `Ok(false)` exactly when storage reports a constraint
    /// violation; every other failure is an error.
    fn add(&self, title: &str, author: &str, year: i32) -> RepoResult<bool>;

    /// Returns the first record whose title exactly equals the argument.
    fn get(&self, title: &str) -> RepoResult<Option<Book>>;

    /// Returns every record in id order, re-queried fresh on each call.
    fn get_all(&self) -> RepoResult<Vec<Book>>;

    /// Sets status on records matching title. `Ok(true)` iff any row changed.
    fn update_status(&self, status: BookStatus, title: &str) -> RepoResult<bool>;

    /// Removes records matching title. `Ok(true)` iff any row was removed.
    fn delete(&self, title: &str) -> RepoResult<bool>;
}

/// SQLite-backed book repository.
///
/// Borrows the manager rather than a raw connection so that every call
/// observes the manager's current open/closed state.
pub struct SqliteBookRepository<'m> {
    manager: &'m DbManager,
}

impl<'m> SqliteBookRepository<'m> {
    pub fn new(manager: &'m DbManager) -> Self {
        Self { manager }
    }

    fn conn(&self) -> RepoResult<&Connection> {
        self.manager
            .connection()
            .ok_or(RepoError::ConnectionUnavailable)
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add(&self, title: &str, author: &str, year: i32) -> RepoResult<bool> {
        let result = self.conn()?.execute(
            "INSERT INTO Library (title, author, year) VALUES (?1, ?2, ?3);",
            params![title, author, year],
        );

        match result {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, title: &str) -> RepoResult<Option<Book>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE title = ?1 LIMIT 1;"))?;

        let mut rows = stmt.query(params![title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn get_all(&self) -> RepoResult<Vec<Book>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn update_status(&self, status: BookStatus, title: &str) -> RepoResult<bool> {
        let changed = self.conn()?.execute(
            "UPDATE Library SET status = ?1 WHERE title = ?2;",
            params![status.as_label(), title],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, title: &str) -> RepoResult<bool> {
        let changed = self
            .conn()?
            .execute("DELETE FROM Library WHERE title = ?1;", params![title])?;

        Ok(changed > 0)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let status_text: String = row.get("status")?;
    let status = BookStatus::from_label(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status label `{status_text}` in Library.status"
        ))
    })?;

    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        status,
    })
}
