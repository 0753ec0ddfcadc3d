//! Film catalog domain.
//!
//! This module provides:
//! - The film record and its input validation
//! - The repository port implemented by the store adapters
//! - An in-memory store for development and tests
//! - The service that implements list, lookup, create and update

mod error;
mod memory;
mod model;
mod repository;
mod service;

pub use error::{FieldViolation, FilmError};
pub use memory::InMemoryFilmRepository;
pub use model::{Film, FilmInput, FilmPatch, NewFilm};
pub use repository::{FilmFilter, FilmRepository, UpdateOutcome};
pub use service::{FilmService, DEFAULT_FETCH_LIMIT};
