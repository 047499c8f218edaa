//! SQLite storage bootstrap for the catalog.
//!
//! # Responsibility
//! - Manage the lifecycle of the single catalog connection.
//! - Guarantee the `Library` table exists before any data access.
//!
//! # Invariants
//! - Core code must not read/write catalog data before the schema bootstrap
//!   succeeds.
//! - A failed open leaves the manager unset; it never pretends success.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod manager;

pub use manager::DbManager;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
