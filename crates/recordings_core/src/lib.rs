//! Album catalog data access over SQLite.
//!
//! The crate exposes a repository for one `album` table, a thin service on
//! top of it, and the connection/config/logging bootstrap around them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::album::{Album, AlbumId};
pub use repo::album_repo::{AlbumRepository, RepoError, RepoResult, SqliteAlbumRepository};
pub use service::album_service::AlbumService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
