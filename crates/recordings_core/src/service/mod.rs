//! Use-case services over the album repository.
//!
//! # Responsibility
//! - Give embedding programs a storage-agnostic entry point.

pub mod album_service;
