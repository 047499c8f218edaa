//! Domain model for the library catalog.
//!
//! # Responsibility
//! - Define the canonical `Book` record and its availability status.
//!
//! # Invariants
//! - `BookStatus` is the only representation of availability inside core;
//!   raw label strings exist solely at the storage and input boundaries.

pub mod book;
