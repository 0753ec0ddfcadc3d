//! Film operation errors.

use dvd_id::IdError;
use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// A single rejected field in a film body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// Errors returned by film operations.
#[derive(Debug, Error)]
pub enum FilmError {
    /// The caller-supplied ID is not a well-formed film ID.
    #[error("invalid film ID: {0}")]
    InvalidIdentifier(#[from] IdError),

    /// The film body failed validation.
    #[error("invalid film record ({} field errors)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// No film exists for the given key.
    #[error("no film matches '{0}'")]
    NotFound(String),

    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}
