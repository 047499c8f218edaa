//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for catalog records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every operation requires a live connection and fails with
//!   `ConnectionUnavailable` otherwise.
//! - Not-found is never an error: absent rows surface as `None` or `false`.

pub mod book_repo;
