//! Repository port for film storage.

use async_trait::async_trait;
use dvd_id::FilmId;

use super::model::{Film, FilmPatch, NewFilm};
use crate::db::DbError;

/// Equality filter for list queries. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmFilter {
    pub title: Option<String>,
    pub director: Option<String>,
}

impl FilmFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn by_director(director: Option<String>) -> Self {
        Self {
            director,
            ..Self::default()
        }
    }

    pub fn matches(&self, film: &Film) -> bool {
        let title_ok = self.title.as_ref().is_none_or(|t| *t == film.title);
        let director_ok = self
            .director
            .as_ref()
            .is_none_or(|d| film.director.as_ref() == Some(d));
        title_ok && director_ok
    }
}

/// Counts reported by a conditional single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose ID matched.
    pub matched: u64,

    /// Documents whose stored values actually changed.
    pub modified: u64,
}

/// Storage operations on the film collection.
///
/// Implementations only need single-document atomicity.
#[async_trait]
pub trait FilmRepository: Send + Sync + 'static {
    /// Returns films matching `filter` in store order, at most `limit` of them.
    async fn list(&self, filter: &FilmFilter, limit: usize) -> Result<Vec<Film>, DbError>;

    /// Inserts a film and returns the ID the store assigned.
    async fn insert(&self, film: NewFilm) -> Result<FilmId, DbError>;

    /// Fetches a film by ID.
    async fn get(&self, id: FilmId) -> Result<Option<Film>, DbError>;

    /// Overwrites the patch's fields on the film with this ID, if any.
    async fn update(&self, id: FilmId, patch: &FilmPatch) -> Result<UpdateOutcome, DbError>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> Result<(), DbError>;
}
