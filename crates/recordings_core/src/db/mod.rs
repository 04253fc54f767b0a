//! SQLite connection bootstrap and album table DDL.
//!
//! # Responsibility
//! - Open, configure and ping the database the repository talks to.
//! - Provide the fixed album table definition and reference sample rows.
//!
//! # Invariants
//! - A connection returned by `open_db` has answered a ping.
//! - Connection failures are reported with the bootstrap stage that failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, ping};
pub use schema::{ensure_album_schema, seed_sample_albums};

pub type DbResult<T> = Result<T, DbError>;

/// Bootstrap step during which a connection failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStage {
    /// Opening the database file or in-memory handle.
    Open,
    /// Applying connection settings such as the busy timeout.
    Configure,
    /// Verifying the connection answers a trivial query.
    Ping,
}

impl ConnectStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Configure => "configure",
            Self::Ping => "ping",
        }
    }
}

#[derive(Debug)]
pub enum DbError {
    /// The database could not be opened or verified. Fatal at startup.
    Connection {
        stage: ConnectStage,
        source: rusqlite::Error,
    },
    /// Schema creation or seeding failed.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Stable error code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection {
                stage: ConnectStage::Open,
                ..
            } => "db_open_failed",
            Self::Connection {
                stage: ConnectStage::Configure,
                ..
            } => "db_configure_failed",
            Self::Connection {
                stage: ConnectStage::Ping,
                ..
            } => "db_ping_failed",
            Self::Sqlite(_) => "db_schema_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection { stage, source } => {
                write!(f, "database connection failed during {}: {source}", stage.as_str())
            }
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
