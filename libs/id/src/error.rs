//! Error types for ID parsing and validation.

use bson::oid;
use thiserror::Error;

/// Errors that can occur when parsing an ID from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The ID string is empty.
    #[error("ID cannot be empty")]
    Empty,

    /// The ID does not have the expected number of characters.
    #[error("ID must be {expected} characters long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The ID contains a character outside the hexadecimal alphabet.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { position: usize, character: char },

    /// The object identifier decoder rejected the text for another reason.
    #[error("malformed ID: {0}")]
    Malformed(String),
}

impl IdError {
    /// Maps a decoder failure on ASCII input.
    #[doc(hidden)]
    pub fn from_oid_error(err: oid::Error, expected: usize) -> Self {
        match err {
            oid::Error::InvalidHexStringLength { length, .. } => IdError::InvalidLength {
                expected,
                actual: length,
            },
            oid::Error::InvalidHexStringCharacter { c, index, .. } => IdError::InvalidCharacter {
                position: index,
                character: c,
            },
            other => IdError::Malformed(other.to_string()),
        }
    }
}
