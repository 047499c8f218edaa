//! Library use-case service.
//!
//! # Responsibility
//! - Validate year and status input before any storage access.
//! - Apply the availability visibility rule on lookups and listings.
//! - Delegate persistence to the repository contract.
//!
//! # Invariants
//! - `IncorrectYear` and `InvalidStatus` are raised before the repository is
//!   touched.
//! - Only `InStock` records are visible through `get_book`/`get_all_books`;
//!   other records stay in storage untouched.

use crate::model::book::{Book, BookStatus};
use crate::repo::book_repo::{BookRepository, RepoError};
use chrono::{Datelike, Local};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Earliest publication year accepted by the catalog.
const MIN_YEAR: i32 = 1000;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error for catalog use cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Year text is not an integer or falls outside `[1000, current_year]`.
    IncorrectYear(String),
    /// Status text is not a member of the closed status enumeration.
    InvalidStatus(String),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectYear(value) => write!(f, "incorrect year: `{value}`"),
            Self::InvalidStatus(value) => write!(f, "invalid status: `{value}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IncorrectYear(_) | Self::InvalidStatus(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Parses and range-checks user-supplied year text.
///
/// # Errors
/// - `IncorrectYear` when the text is not an integer or the parsed year is
///   outside `[1000, current_calendar_year]`.
pub fn validate_year(year_text: &str) -> ServiceResult<i32> {
    let year: i32 = year_text
        .trim()
        .parse()
        .map_err(|_| ServiceError::IncorrectYear(year_text.to_string()))?;

    let current_year = Local::now().year();
    if !(MIN_YEAR..=current_year).contains(&year) {
        return Err(ServiceError::IncorrectYear(year_text.to_string()));
    }

    Ok(year)
}

/// Parses user-supplied status text against the closed enumeration.
///
/// # Errors
/// - `InvalidStatus` for any text outside `{"in stock", "out of stock"}`.
pub fn validate_status(status_text: &str) -> ServiceResult<BookStatus> {
    BookStatus::from_label(status_text.trim())
        .ok_or_else(|| ServiceError::InvalidStatus(status_text.to_string()))
}

/// Use-case service for the library catalog.
pub struct LibraryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book to the catalog.
    ///
    /// New records start `InStock` through the schema default. A
    /// constraint-rejected insert is logged and not treated as a failure;
    /// success is implied by absence of an error.
    ///
    /// # Errors
    /// - `IncorrectYear` before any storage access.
    /// - `Repo` for storage failures.
    pub fn add_book(&self, title: &str, author: &str, year_text: &str) -> ServiceResult<()> {
        let year = validate_year(year_text)?;

        if self.repo.add(title, author, year)? {
            info!("event=book_added module=service status=ok title={title} author={author} year={year}");
        } else {
            warn!("event=book_added module=service status=rejected title={title}");
        }

        Ok(())
    }

    /// Returns the book with the given title, only while it is in stock.
    ///
    /// Records in any other status are reported as absent even though they
    /// still exist in storage. This is a visibility filter, not a deletion.
    pub fn get_book(&self, title: &str) -> ServiceResult<Option<Book>> {
        let book = self.repo.get(title)?;

        match book {
            Some(book) if book.is_available() => {
                info!("event=book_lookup module=service status=ok title={title}");
                Ok(Some(book))
            }
            _ => {
                warn!("event=book_lookup module=service status=not_found title={title}");
                Ok(None)
            }
        }
    }

    /// Returns every in-stock book, preserving the repository's retrieval
    /// order.
    pub fn get_all_books(&self) -> ServiceResult<Vec<Book>> {
        let books = self.repo.get_all()?;
        let available: Vec<Book> = books.into_iter().filter(Book::is_available).collect();

        info!(
            "event=book_list module=service status=ok available={}",
            available.len()
        );
        Ok(available)
    }

    /// Updates the status of the book with the given title.
    ///
    /// Returns `Ok(true)` iff a record was changed.
    ///
    /// # Errors
    /// - `InvalidStatus` before any storage access.
    /// - `Repo` for storage failures.
    pub fn update_status(&self, status_text: &str, title: &str) -> ServiceResult<bool> {
        let status = validate_status(status_text)?;

        let changed = self.repo.update_status(status, title)?;
        if changed {
            info!(
                "event=status_updated module=service status=ok title={title} new_status={}",
                status.as_label()
            );
        } else {
            warn!("event=status_updated module=service status=not_found title={title}");
        }

        Ok(changed)
    }

    /// Deletes the book with the given title. Returns `Ok(true)` iff a
    /// record was removed.
    pub fn delete_book(&self, title: &str) -> ServiceResult<bool> {
        let deleted = self.repo.delete(title)?;
        if deleted {
            info!("event=book_deleted module=service status=ok title={title}");
        } else {
            warn!("event=book_deleted module=service status=not_found title={title}");
        }

        Ok(deleted)
    }
}
