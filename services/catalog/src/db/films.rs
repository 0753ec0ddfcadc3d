//! MongoDB film store.

use async_trait::async_trait;
use dvd_id::FilmId;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DbError;
use crate::films::{Film, FilmFilter, FilmPatch, FilmRepository, NewFilm, UpdateOutcome};

/// A film document as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FilmDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    year: i32,
    location: String,
    available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    director: Option<String>,
}

/// A film document before the store assigns `_id`.
#[derive(Debug, Clone, Serialize)]
struct NewFilmDocument {
    title: String,
    year: i32,
    location: String,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    director: Option<String>,
}

impl FilmDocument {
    fn into_film(self) -> Film {
        Film {
            id: FilmId::from_object_id(self.id),
            title: self.title,
            year: self.year,
            location: self.location,
            available: self.available,
            director: self.director,
        }
    }
}

impl NewFilmDocument {
    fn from_new_film(film: NewFilm) -> Self {
        Self {
            title: film.title,
            year: film.year,
            location: film.location,
            available: film.available,
            director: film.director,
        }
    }
}

fn filter_document(filter: &FilmFilter) -> Document {
    let mut query = Document::new();
    if let Some(title) = &filter.title {
        query.insert("title", title.as_str());
    }
    if let Some(director) = &filter.director {
        query.insert("director", director.as_str());
    }
    query
}

fn set_document(patch: &FilmPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = &patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(year) = patch.year {
        set.insert("year", year);
    }
    if let Some(location) = &patch.location {
        set.insert("location", location.as_str());
    }
    if let Some(available) = patch.available {
        set.insert("available", available);
    }
    if let Some(director) = &patch.director {
        set.insert("director", director.as_str());
    }
    set
}

/// Film repository backed by a single MongoDB collection.
#[derive(Clone)]
pub struct MongoFilmStore {
    database: mongodb::Database,
    collection: Collection<FilmDocument>,
}

impl MongoFilmStore {
    pub(super) fn new(database: mongodb::Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
            database,
        }
    }
}

#[async_trait]
impl FilmRepository for MongoFilmStore {
    async fn list(&self, filter: &FilmFilter, limit: usize) -> Result<Vec<Film>, DbError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let cursor = self
            .collection
            .find(filter_document(filter))
            .limit(limit)
            .await
            .map_err(DbError::Query)?;

        let docs: Vec<FilmDocument> = cursor.try_collect().await.map_err(DbError::Query)?;
        Ok(docs.into_iter().map(FilmDocument::into_film).collect())
    }

    async fn insert(&self, film: NewFilm) -> Result<FilmId, DbError> {
        let result = self
            .collection
            .clone_with_type::<NewFilmDocument>()
            .insert_one(NewFilmDocument::from_new_film(film))
            .await
            .map_err(DbError::Query)?;

        result
            .inserted_id
            .as_object_id()
            .map(FilmId::from_object_id)
            .ok_or(DbError::MissingInsertedId)
    }

    async fn get(&self, id: FilmId) -> Result<Option<Film>, DbError> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id.object_id() })
            .await
            .map_err(DbError::Query)?;
        Ok(doc.map(FilmDocument::into_film))
    }

    async fn update(&self, id: FilmId, patch: &FilmPatch) -> Result<UpdateOutcome, DbError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id.object_id() },
                doc! { "$set": set_document(patch) },
            )
            .await
            .map_err(DbError::Query)?;

        debug!(
            film_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Applied film update"
        );

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn health_check(&self) -> Result<(), DbError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(DbError::Query)?;
        Ok(())
    }
}
