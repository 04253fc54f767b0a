//! Album table definition and reference rows.
//!
//! Row scans in the repository are positional, so the column order below is
//! part of the contract.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};

pub const ALBUM_TABLE: &str = "album";

/// Columns of the album table, in positional order.
pub const ALBUM_COLUMNS: &[&str] = &["id", "title", "artist", "price"];

pub const ALBUM_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS album (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    artist TEXT NOT NULL,
    price REAL NOT NULL
);";

/// Reference catalog rows as `(title, artist, price)`.
pub const SAMPLE_ALBUMS: &[(&str, &str, f64)] = &[
    ("Blue Train", "John Coltrane", 56.99),
    ("Giant Steps", "John Coltrane", 63.99),
    ("Jeru", "Gerry Mulligan", 17.99),
    ("Sarah Vaughan", "Sarah Vaughan", 34.98),
];

/// Creates the album table when missing. Safe to call repeatedly.
pub fn ensure_album_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(ALBUM_SCHEMA_SQL)?;
    Ok(())
}

/// Inserts `SAMPLE_ALBUMS` into an empty album table.
///
/// Returns the number of inserted rows; `0` when the table already had data.
pub fn seed_sample_albums(conn: &Connection) -> DbResult<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM album;", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    let mut stmt = conn.prepare("INSERT INTO album (title, artist, price) VALUES (?1, ?2, ?3);")?;
    let mut inserted = 0;
    for (title, artist, price) in SAMPLE_ALBUMS {
        inserted += stmt.execute(params![title, artist, price])?;
    }

    info!("event=db_seed module=db status=ok rows={inserted}");
    Ok(inserted)
}
