//! Core use-case services.
//!
//! # Responsibility
//! - Enforce domain validation and visibility rules on top of the repository.
//! - Keep the shell layer decoupled from storage details.

pub mod library_service;
