//! Application state shared across request handlers.

use std::sync::Arc;

use crate::films::FilmService;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    films: FilmService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(films: FilmService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { films }),
        }
    }

    /// Get a reference to the film service.
    pub fn films(&self) -> &FilmService {
        &self.inner.films
    }
}
