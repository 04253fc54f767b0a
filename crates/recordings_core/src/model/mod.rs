//! Domain model for the album catalog.
//!
//! # Responsibility
//! - Define the record shape shared by repository, service and callers.
//!
//! # Invariants
//! - Album identity is assigned by the database, never by callers.
//! - Deletion is a hard delete; there are no tombstones.

pub mod album;
