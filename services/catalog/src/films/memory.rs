//! Volatile film store.
//!
//! Mirrors the document store's observable behaviour: insertion order is
//! store order, IDs are assigned on insert, and an update that writes the
//! values already stored reports zero modifications.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dvd_id::FilmId;
use tokio::sync::RwLock;

use super::model::{Film, FilmPatch, NewFilm};
use super::repository::{FilmFilter, FilmRepository, UpdateOutcome};
use crate::db::DbError;

#[derive(Debug, Default)]
pub struct InMemoryFilmRepository {
    films: RwLock<Vec<Film>>,
    unavailable: AtomicBool,
}

impl InMemoryFilmRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("in-memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FilmRepository for InMemoryFilmRepository {
    async fn list(&self, filter: &FilmFilter, limit: usize) -> Result<Vec<Film>, DbError> {
        self.ensure_available()?;
        let films = self.films.read().await;
        Ok(films
            .iter()
            .filter(|film| filter.matches(film))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert(&self, film: NewFilm) -> Result<FilmId, DbError> {
        self.ensure_available()?;
        let id = FilmId::new();
        self.films.write().await.push(film.into_film(id));
        Ok(id)
    }

    async fn get(&self, id: FilmId) -> Result<Option<Film>, DbError> {
        self.ensure_available()?;
        let films = self.films.read().await;
        Ok(films.iter().find(|film| film.id == id).cloned())
    }

    async fn update(&self, id: FilmId, patch: &FilmPatch) -> Result<UpdateOutcome, DbError> {
        self.ensure_available()?;
        let mut films = self.films.write().await;
        let Some(film) = films.iter_mut().find(|film| film.id == id) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = patch.apply_to(film);
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn health_check(&self) -> Result<(), DbError> {
        self.ensure_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_film(title: &str, director: Option<&str>) -> NewFilm {
        NewFilm {
            title: title.to_string(),
            year: 1999,
            location: "Helsinki".to_string(),
            available: true,
            director: director.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_limit() {
        let repo = InMemoryFilmRepository::new();
        for title in ["A", "B", "C"] {
            repo.insert(new_film(title, None)).await.unwrap();
        }

        let all = repo.list(&FilmFilter::default(), 10).await.unwrap();
        let titles: Vec<_> = all.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let capped = repo.list(&FilmFilter::default(), 2).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn test_filters() {
        let repo = InMemoryFilmRepository::new();
        repo.insert(new_film("Heat", Some("Michael Mann"))).await.unwrap();
        repo.insert(new_film("Heat", None)).await.unwrap();
        repo.insert(new_film("Thief", Some("Michael Mann"))).await.unwrap();

        let by_title = repo.list(&FilmFilter::by_title("Heat"), 10).await.unwrap();
        assert_eq!(by_title.len(), 2);

        let by_director = repo
            .list(&FilmFilter::by_director(Some("Michael Mann".to_string())), 10)
            .await
            .unwrap();
        assert_eq!(by_director.len(), 2);

        let case_sensitive = repo.list(&FilmFilter::by_title("heat"), 10).await.unwrap();
        assert!(case_sensitive.is_empty());
    }

    #[tokio::test]
    async fn test_update_counts() {
        let repo = InMemoryFilmRepository::new();
        let id = repo.insert(new_film("Heat", None)).await.unwrap();

        let patch = FilmPatch {
            available: Some(false),
            ..FilmPatch::default()
        };
        let first = repo.update(id, &patch).await.unwrap();
        assert_eq!(first, UpdateOutcome { matched: 1, modified: 1 });

        let second = repo.update(id, &patch).await.unwrap();
        assert_eq!(second, UpdateOutcome { matched: 1, modified: 0 });

        let missing = repo.update(FilmId::new(), &patch).await.unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let repo = InMemoryFilmRepository::new();
        repo.set_unavailable(true);
        assert!(repo.health_check().await.is_err());
        assert!(matches!(
            repo.get(FilmId::new()).await,
            Err(DbError::Unavailable(_))
        ));

        repo.set_unavailable(false);
        assert!(repo.health_check().await.is_ok());
    }
}
