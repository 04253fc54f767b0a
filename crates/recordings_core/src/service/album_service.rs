//! Album use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for core callers.
//! - Offer a recoverable lookup that treats a missing album as `None`.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - No transaction spans more than one repository call.

use crate::model::album::{Album, AlbumId};
use crate::repo::album_repo::{AlbumRepository, RepoError, RepoResult};

/// Use-case service wrapper for album operations.
pub struct AlbumService<R: AlbumRepository> {
    repo: R,
}

impl<R: AlbumRepository> AlbumService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_by_artist(&self, artist: &str) -> RepoResult<Vec<Album>> {
        self.repo.list_by_artist(artist)
    }

    /// Gets one album; a missing id is an error.
    pub fn get_by_id(&self, id: AlbumId) -> RepoResult<Album> {
        self.repo.get_by_id(id)
    }

    /// Gets one album; a missing id is `Ok(None)`.
    pub fn find_by_id(&self, id: AlbumId) -> RepoResult<Option<Album>> {
        match self.repo.get_by_id(id) {
            Ok(album) => Ok(Some(album)),
            Err(RepoError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn create(&self, album: &Album) -> RepoResult<AlbumId> {
        self.repo.create(album)
    }

    /// Creates albums in order and returns their ids.
    ///
    /// Stops at the first failure; albums created before it stay stored.
    pub fn add_all(&self, albums: &[Album]) -> RepoResult<Vec<AlbumId>> {
        albums.iter().map(|album| self.repo.create(album)).collect()
    }

    /// Replaces title, artist and price of album `id`.
    pub fn update(&self, id: AlbumId, album: &Album) -> RepoResult<usize> {
        self.repo.update(id, album)
    }

    pub fn delete(&self, id: AlbumId) -> RepoResult<usize> {
        self.repo.delete(id)
    }

    pub fn into_inner(self) -> R {
        self.repo
    }
}
