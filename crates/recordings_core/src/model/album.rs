//! Album domain model.
//!
//! # Responsibility
//! - Define the canonical album record mirrored by the `album` table.
//!
//! # Invariants
//! - `id` is assigned once by the database on insert and never changes.
//! - No field is nullable.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Database-assigned album identifier (auto-increment rowid).
pub type AlbumId = i64;

/// Placeholder id carried by albums that have not been persisted yet.
pub const UNSAVED_ALBUM_ID: AlbumId = 0;

/// One row of the `album` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Ignored by create/update; the row id is the source of truth.
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    /// Monetary price, stored as SQLite `REAL`.
    pub price: f64,
}

impl Album {
    /// Creates an unsaved album. The id stays `UNSAVED_ALBUM_ID` until the
    /// repository returns the database-assigned one.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        Self::with_id(UNSAVED_ALBUM_ID, title, artist, price)
    }

    /// Creates an album with a known id, as materialized from a stored row.
    pub fn with_id(
        id: AlbumId,
        title: impl Into<String>,
        artist: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Returns whether this album has been assigned an id by the database.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ALBUM_ID
    }
}

impl Display for Album {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} {} by {} (${:.2})",
            self.id, self.title, self.artist, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Album, UNSAVED_ALBUM_ID};

    #[test]
    fn new_album_is_unsaved() {
        let album = Album::new("Jeru", "Gerry Mulligan", 17.99);
        assert_eq!(album.id, UNSAVED_ALBUM_ID);
        assert!(!album.is_persisted());
    }

    #[test]
    fn display_formats_price_with_two_decimals() {
        let album = Album::with_id(3, "Jeru", "Gerry Mulligan", 17.9);
        assert_eq!(album.to_string(), "#3 Jeru by Gerry Mulligan ($17.90)");
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let album = Album::with_id(7, "Blue Train", "John Coltrane", 56.99);
        let json = serde_json::to_value(&album).expect("album should serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Blue Train");
        assert_eq!(json["artist"], "John Coltrane");
        assert_eq!(json["price"], 56.99);
    }
}
