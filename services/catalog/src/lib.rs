//! DVD catalog service library.
//!
//! This crate primarily ships a `catalog-api` binary, but we expose a small
//! library surface to enable integration testing and reuse.

pub mod api;
pub mod config;
pub mod db;
pub mod films;
pub mod state;
