//! Film operations composed over a [`FilmRepository`].

use std::sync::Arc;

use dvd_id::FilmId;
use tracing::{debug, info};

use super::error::FilmError;
use super::model::{Film, FilmInput};
use super::repository::{FilmFilter, FilmRepository};
use crate::db::DbError;

/// Maximum number of films returned by list and lookup.
pub const DEFAULT_FETCH_LIMIT: usize = 1000;

/// Film operations shared by all request handlers.
#[derive(Clone)]
pub struct FilmService {
    repo: Arc<dyn FilmRepository>,
    fetch_limit: usize,
}

impl FilmService {
    pub fn new(repo: Arc<dyn FilmRepository>) -> Self {
        Self {
            repo,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Overrides the list/lookup cap. Films beyond it are silently omitted.
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn repository(&self) -> &dyn FilmRepository {
        self.repo.as_ref()
    }

    /// Lists films in store order, optionally restricted to one director.
    ///
    /// An empty catalog is an empty list, never `NotFound`. An empty director
    /// name is treated as no filter.
    pub async fn list(&self, director: Option<String>) -> Result<Vec<Film>, FilmError> {
        let filter = FilmFilter::by_director(director.filter(|d| !d.is_empty()));
        let films = self.repo.list(&filter, self.fetch_limit).await?;
        debug!(count = films.len(), "Listed films");
        Ok(films)
    }

    /// Returns every film whose title equals `title` exactly.
    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Film>, FilmError> {
        let films = self
            .repo
            .list(&FilmFilter::by_title(title), self.fetch_limit)
            .await?;

        if films.is_empty() {
            return Err(FilmError::NotFound(title.to_string()));
        }
        Ok(films)
    }

    /// Validates and inserts a film, returning the record as stored.
    pub async fn create(&self, input: FilmInput) -> Result<Film, FilmError> {
        let new_film = input.into_new_film()?;
        let id = self.repo.insert(new_film).await?;
        info!(film_id = %id, "Film created");

        self.repo
            .get(id)
            .await?
            .ok_or_else(|| FilmError::Storage(DbError::NotPersisted(id.to_string())))
    }

    /// Applies the non-null fields of `input` to the film `id`.
    ///
    /// Returns the current record whether or not anything changed; fails
    /// with `NotFound` only if no film has this ID.
    pub async fn update(&self, id: FilmId, input: FilmInput) -> Result<Film, FilmError> {
        let patch = input.into_patch()?;

        if !patch.is_empty() {
            let outcome = self.repo.update(id, &patch).await?;
            if outcome.modified == 1 {
                info!(film_id = %id, "Film updated");
            } else {
                // Zero modifications means either a missing ID or identical
                // values; the read below tells them apart.
                debug!(film_id = %id, matched = outcome.matched, "Update modified nothing");
            }
        }

        self.repo
            .get(id)
            .await?
            .ok_or_else(|| FilmError::NotFound(id.to_string()))
    }
}
