//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record and its availability status.
//! - Own the mapping between `BookStatus` and its persisted text labels.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never changes afterwards.
//! - `status` is always a member of the closed enumeration inside core;
//!   unknown persisted labels are rejected at the read boundary, not masked.

use serde::{Deserialize, Serialize};

/// Availability status of a catalog record.
///
/// Persisted as a short text label; `from_label` is the single place where
/// raw status input is validated against the closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// Present on the shelf and visible through service lookups.
    InStock,
    /// Still recorded, but hidden from service lookups and listings.
    OutOfStock,
}

impl BookStatus {
    /// Returns the text label stored in the `status` column.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::InStock => "in stock",
            Self::OutOfStock => "out of stock",
        }
    }

    /// Parses a stored or user-supplied label into a status.
    ///
    /// Returns `None` for any label outside the closed enumeration.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "in stock" => Some(Self::InStock),
            "out of stock" => Some(Self::OutOfStock),
            _ => None,
        }
    }
}

/// Canonical catalog record.
///
/// Title is the external lookup key. The schema declares no uniqueness on it,
/// so lookups operate on the first match in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Storage-assigned row id, immutable after insert.
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Publication year, validated to `[1000, current_year]` on the way in.
    pub year: i32,
    pub status: BookStatus,
}

impl Book {
    /// Returns whether this record is visible through service accessors.
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookStatus};

    #[test]
    fn status_labels_roundtrip() {
        for status in [BookStatus::InStock, BookStatus::OutOfStock] {
            assert_eq!(BookStatus::from_label(status.as_label()), Some(status));
        }
    }

    #[test]
    fn from_label_rejects_unknown_values() {
        assert_eq!(BookStatus::from_label("lost"), None);
        assert_eq!(BookStatus::from_label(""), None);
        assert_eq!(BookStatus::from_label("In Stock"), None);
    }

    #[test]
    fn availability_follows_status() {
        let mut book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            year: 1965,
            status: BookStatus::InStock,
        };
        assert!(book.is_available());

        book.status = BookStatus::OutOfStock;
        assert!(!book.is_available());
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&BookStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
    }
}
