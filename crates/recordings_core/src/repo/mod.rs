//! Repository layer: album data access over SQLite.
//!
//! # Responsibility
//! - Define the album data-access contract.
//! - Keep SQL text and row mapping out of service and caller code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) distinct from
//!   query and write transport errors.

pub mod album_repo;
