//! Connection bootstrap utilities.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections from `DatabaseConfig`.
//! - Apply connection settings and verify liveness before handing out a handle.
//!
//! # Invariants
//! - Returned connections have answered `SELECT 1`.
//! - The album table exists on return when `create_schema` is set.

use super::schema::ensure_album_schema;
use super::{ConnectStage, DbError, DbResult};
use crate::config::DatabaseConfig;
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::time::Instant;

/// Opens the configured database, pings it, and optionally creates the album
/// table.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - `DbError::Connection` when open, configuration or ping fails.
/// - `DbError::Sqlite` when schema creation fails.
pub fn open_db(config: &DatabaseConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = if config.is_in_memory() { "memory" } else { "file" };
    info!(
        "event=db_open module=db status=start mode={} read_only={}",
        mode, config.read_only
    );

    match bootstrap_connection(config) {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code={} error={}",
                mode,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

/// Opens a fresh in-memory database with the album table created.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db(&DatabaseConfig::in_memory())
}

/// Verifies the connection answers a trivial query.
pub fn ping(conn: &Connection) -> DbResult<()> {
    conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))
        .map(|_| ())
        .map_err(|source| DbError::Connection {
            stage: ConnectStage::Ping,
            source,
        })
}

fn bootstrap_connection(config: &DatabaseConfig) -> DbResult<Connection> {
    let flags = open_flags(config.read_only);
    let conn = match config.path.as_deref() {
        Some(path) => Connection::open_with_flags(path, flags),
        None => Connection::open_in_memory_with_flags(flags),
    }
    .map_err(|source| DbError::Connection {
        stage: ConnectStage::Open,
        source,
    })?;

    conn.busy_timeout(config.busy_timeout())
        .map_err(|source| DbError::Connection {
            stage: ConnectStage::Configure,
            source,
        })?;
    ping(&conn)?;

    if config.create_schema {
        ensure_album_schema(&conn)?;
    }

    Ok(conn)
}

fn open_flags(read_only: bool) -> OpenFlags {
    if read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
    } else {
        OpenFlags::default()
    }
}
