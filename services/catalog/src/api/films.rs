//! Film API endpoints.
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/films` | list, optional `?director=` |
//! | GET | `/film/{title}` | lookup by exact title |
//! | POST | `/film` | create |
//! | PUT | `/film/{id}` | partial update |

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use dvd_id::FilmId;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::request_context::RequestContext;
use crate::films::{Film, FilmError, FilmInput};
use crate::state::AppState;

/// Create film routes.
///
/// Lookup and update share `/film/{...}`: the segment is a title for GET and
/// an ID for PUT.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/films", get(list_films))
        .route("/film", post(create_film))
        .route("/film/{key}", get(find_films_by_title).put(update_film))
}

#[derive(Debug, Deserialize)]
pub struct ListFilmsQuery {
    pub director: Option<String>,
}

/// List films.
///
/// GET /films
async fn list_films(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListFilmsQuery>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = state
        .films()
        .list(query.director)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(ctx.request_id.clone()))?;
    Ok(Json(films))
}

/// Find all films with an exact title.
///
/// GET /film/{title}
async fn find_films_by_title(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(title): Path<String>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let films = state
        .films()
        .find_by_title(&title)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(ctx.request_id.clone()))?;
    Ok(Json(films))
}

/// Create a film.
///
/// POST /film
async fn create_film(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Json<FilmInput>, JsonRejection>,
) -> Result<Json<Film>, ApiError> {
    let Json(input) = body.map_err(|rejection| {
        ApiError::from_json_rejection(&rejection).with_request_id(ctx.request_id.clone())
    })?;

    let film = state
        .films()
        .create(input)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(ctx.request_id.clone()))?;

    tracing::info!(film_id = %film.id, request_id = %ctx.request_id, "Created film");
    Ok(Json(film))
}

/// Update a film's non-null fields.
///
/// PUT /film/{id}
async fn update_film(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    body: Result<Json<FilmInput>, JsonRejection>,
) -> Result<Json<Film>, ApiError> {
    // A malformed ID is reported even when the body is also invalid.
    let id = FilmId::parse(&id).map_err(|e| {
        ApiError::from(FilmError::from(e)).with_request_id(ctx.request_id.clone())
    })?;

    let Json(input) = body.map_err(|rejection| {
        ApiError::from_json_rejection(&rejection).with_request_id(ctx.request_id.clone())
    })?;

    let film = state
        .films()
        .update(id, input)
        .await
        .map_err(|e| ApiError::from(e).with_request_id(ctx.request_id.clone()))?;

    Ok(Json(film))
}
