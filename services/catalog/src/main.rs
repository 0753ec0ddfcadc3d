//! DVD catalog API server.
//!
//! Serves the film catalog over REST and owns the store connection for the
//! lifetime of the process.

use std::sync::Arc;

use anyhow::Result;
use dvd_catalog::{
    api,
    config::{self, StoreBackend},
    db::Database,
    films::{FilmRepository, FilmService, InMemoryFilmRepository},
    state::AppState,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize tracing (prefer RUST_LOG, fallback to DVD_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting DVD catalog API");
    info!(
        listen_addr = %config.listen_addr,
        store = ?config.store,
        fetch_limit = config.fetch_limit,
        "Configuration loaded"
    );

    let (repo, database): (Arc<dyn FilmRepository>, Option<Database>) = match config.store {
        StoreBackend::MongoDb => {
            let db = match Database::connect(&config.database).await {
                Ok(db) => db,
                Err(e) => {
                    error!(error = %e, "Failed to connect to database");
                    return Err(e.into());
                }
            };
            (Arc::new(db.films()), Some(db))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory film store; data is lost on exit");
            (Arc::new(InMemoryFilmRepository::new()), None)
        }
    };

    // Create application state
    let films = FilmService::new(repo).with_fetch_limit(config.fetch_limit);
    let state = AppState::new(films);

    // Build and run the server
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Listening for connections");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Received shutdown signal");
        })
        .await;

    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    if let Some(db) = database {
        db.shutdown().await;
    }

    info!("DVD catalog API shutdown complete");
    served.map_err(Into::into)
}
