//! # dvd-id
//!
//! Identifier types for the DVD catalog.
//!
//! ## Design Principles
//!
//! - IDs are assigned by the document store; clients only ever echo them back
//! - The API exposes IDs as plain text and never leaks the store's key type
//! - Parsing is strict and happens before any store lookup
//! - Formatting is total and canonical (lower-case hex)
//!
//! ## ID Format
//!
//! A film ID is the 24-character hexadecimal rendering of the store's
//! 12-byte object identifier, for example `65a1f0c2e4b0a1b2c3d4e5f6`.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export the native key type for store adapters.
pub use bson::oid::ObjectId;
