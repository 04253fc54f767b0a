//! Album repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map list/get/create/update/delete onto one parameterized statement each.
//! - Translate driver results into `RepoError` variants.
//!
//! # Invariants
//! - Caller-supplied `Album::id` is never written; the database assigns ids.
//! - Update and delete report `NotFound` when no row was affected.
//! - Rows are read positionally as `(id, title, artist, price)`.

use crate::db::schema::{ALBUM_COLUMNS, ALBUM_TABLE};
use crate::model::album::{Album, AlbumId};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ALBUMS_BY_ARTIST_SQL: &str = "SELECT * FROM album WHERE artist = ?";
const ALBUM_BY_ID_SQL: &str = "SELECT * FROM album WHERE id = ?";
const INSERT_ALBUM_SQL: &str = "INSERT INTO album (title, artist, price) VALUES (?, ?, ?)";
const UPDATE_ALBUM_SQL: &str = "UPDATE album SET title=?, artist=?, price=? WHERE id=?";
const DELETE_ALBUM_SQL: &str = "DELETE FROM album WHERE id=?";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// A read failed for a reason other than a missing row.
    Query {
        op: &'static str,
        source: rusqlite::Error,
    },
    /// No album row has this id.
    NotFound(AlbumId),
    /// An insert/update/delete failed. `source` is `None` when the insert
    /// ran but no new id came back.
    Write {
        op: &'static str,
        source: Option<rusqlite::Error>,
    },
    MissingRequiredTable(&'static str),
    UnexpectedColumnLayout {
        table: &'static str,
        expected: &'static [&'static str],
        actual: Vec<String>,
    },
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Query { .. } => "query_failed",
            Self::NotFound(_) => "not_found",
            Self::Write { .. } => "write_failed",
            Self::MissingRequiredTable(_) | Self::UnexpectedColumnLayout { .. } => {
                "schema_mismatch"
            }
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query { op, source } => write!(f, "{op}: {source}"),
            Self::NotFound(id) => write!(f, "album not found: {id}"),
            Self::Write {
                op,
                source: Some(source),
            } => write!(f, "{op}: {source}"),
            Self::Write { op, source: None } => {
                write!(f, "{op}: database did not return a new album id")
            }
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::UnexpectedColumnLayout {
                table,
                expected,
                actual,
            } => write!(
                f,
                "table `{table}` has columns ({}) but ({}) is required",
                actual.join(", "),
                expected.join(", ")
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query { source, .. } => Some(source),
            Self::Write {
                source: Some(source),
                ..
            } => Some(source),
            Self::Write { source: None, .. }
            | Self::NotFound(_)
            | Self::MissingRequiredTable(_)
            | Self::UnexpectedColumnLayout { .. } => None,
        }
    }
}

/// Data-access contract for the album table.
pub trait AlbumRepository {
    /// Albums whose artist equals `artist` exactly, in storage order.
    fn list_by_artist(&self, artist: &str) -> RepoResult<Vec<Album>>;
    fn get_by_id(&self, id: AlbumId) -> RepoResult<Album>;
    /// Inserts title/artist/price and returns the database-assigned id.
    fn create(&self, album: &Album) -> RepoResult<AlbumId>;
    /// Overwrites title/artist/price of row `id`; returns the affected count.
    fn update(&self, id: AlbumId, album: &Album) -> RepoResult<usize>;
    /// Hard-deletes row `id`; returns the affected count.
    fn delete(&self, id: AlbumId) -> RepoResult<usize>;
}

/// SQLite-backed album repository borrowing a caller-owned connection.
pub struct SqliteAlbumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlbumRepository<'conn> {
    /// Wraps a connection without inspecting its schema.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking the album table layout matches the
    /// positional row mapping.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_album_layout(conn)?;
        Ok(Self::new(conn))
    }
}

impl AlbumRepository for SqliteAlbumRepository<'_> {
    fn list_by_artist(&self, artist: &str) -> RepoResult<Vec<Album>> {
        let result = select_albums_by_artist(self.conn, artist).map_err(|source| {
            RepoError::Query {
                op: "list_by_artist",
                source,
            }
        });
        match &result {
            Ok(albums) => debug!(
                "event=album_list_by_artist module=repo status=ok rows={}",
                albums.len()
            ),
            Err(err) => log_failure("album_list_by_artist", err),
        }
        result
    }

    fn get_by_id(&self, id: AlbumId) -> RepoResult<Album> {
        let result = match self.conn.query_row(ALBUM_BY_ID_SQL, [id], parse_album_row) {
            Ok(album) => Ok(album),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepoError::NotFound(id)),
            Err(source) => Err(RepoError::Query {
                op: "get_by_id",
                source,
            }),
        };
        match &result {
            Ok(_) => debug!("event=album_get module=repo status=ok id={id}"),
            Err(err) => log_failure("album_get", err),
        }
        result
    }

    fn create(&self, album: &Album) -> RepoResult<AlbumId> {
        let result = self
            .conn
            .execute(
                INSERT_ALBUM_SQL,
                params![album.title.as_str(), album.artist.as_str(), album.price],
            )
            .map_err(|source| RepoError::Write {
                op: "create",
                source: Some(source),
            })
            .and_then(|inserted| {
                let id = self.conn.last_insert_rowid();
                if inserted == 0 || id <= 0 {
                    return Err(RepoError::Write {
                        op: "create",
                        source: None,
                    });
                }
                Ok(id)
            });
        match &result {
            Ok(id) => debug!("event=album_create module=repo status=ok id={id}"),
            Err(err) => log_failure("album_create", err),
        }
        result
    }

    fn update(&self, id: AlbumId, album: &Album) -> RepoResult<usize> {
        let result = self
            .conn
            .execute(
                UPDATE_ALBUM_SQL,
                params![album.title.as_str(), album.artist.as_str(), album.price, id],
            )
            .map_err(|source| RepoError::Write {
                op: "update",
                source: Some(source),
            })
            .and_then(|changed| require_affected(id, changed));
        match &result {
            Ok(changed) => {
                debug!("event=album_update module=repo status=ok id={id} affected={changed}")
            }
            Err(err) => log_failure("album_update", err),
        }
        result
    }

    fn delete(&self, id: AlbumId) -> RepoResult<usize> {
        let result = self
            .conn
            .execute(DELETE_ALBUM_SQL, [id])
            .map_err(|source| RepoError::Write {
                op: "delete",
                source: Some(source),
            })
            .and_then(|changed| require_affected(id, changed));
        match &result {
            Ok(changed) => {
                debug!("event=album_delete module=repo status=ok id={id} affected={changed}")
            }
            Err(err) => log_failure("album_delete", err),
        }
        result
    }
}

fn select_albums_by_artist(conn: &Connection, artist: &str) -> rusqlite::Result<Vec<Album>> {
    let mut stmt = conn.prepare(ALBUMS_BY_ARTIST_SQL)?;
    let rows = stmt.query_map([artist], parse_album_row)?;
    rows.collect()
}

fn parse_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        title: row.get(1)?,
        artist: row.get(2)?,
        price: row.get(3)?,
    })
}

fn require_affected(id: AlbumId, changed: usize) -> RepoResult<usize> {
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(changed)
}

fn log_failure(event: &str, err: &RepoError) {
    warn!(
        "event={event} module=repo status=error error_code={} error={err}",
        err.code()
    );
}

fn ensure_album_layout(conn: &Connection) -> RepoResult<()> {
    let schema_error = |source: rusqlite::Error| RepoError::Query {
        op: "try_new",
        source,
    };

    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [ALBUM_TABLE],
            |row| row.get(0),
        )
        .map_err(schema_error)?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(ALBUM_TABLE));
    }

    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid;")
        .map_err(schema_error)?;
    let actual = stmt
        .query_map([ALBUM_TABLE], |row| row.get::<_, String>(0))
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .map_err(schema_error)?;

    if !actual.iter().map(String::as_str).eq(ALBUM_COLUMNS.iter().copied()) {
        return Err(RepoError::UnexpectedColumnLayout {
            table: ALBUM_TABLE,
            expected: ALBUM_COLUMNS,
            actual,
        });
    }

    Ok(())
}
