//! Database layer for the catalog.
//!
//! This module provides:
//! - MongoDB client configuration and lifecycle
//! - The MongoDB implementation of the film repository

mod error;
mod films;

pub use error::DbError;
pub use films::MongoFilmStore;

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::info;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// MongoDB connection string.
    pub uri: String,

    /// Database holding the film collection.
    pub database: String,

    /// Collection holding one document per film.
    pub collection: String,

    /// Maximum number of pooled connections.
    pub max_pool_size: u32,

    /// Minimum number of pooled connections.
    pub min_pool_size: u32,

    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,

    /// Timeout for finding a usable server.
    pub server_selection_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "dvd_catalog".to_string(),
            collection: "films".to_string(),
            max_pool_size: 10,
            min_pool_size: 1,
            connect_timeout: Duration::from_secs(5),
            server_selection_timeout: Duration::from_secs(5),
        }
    }
}

impl DbConfig {
    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_pool_size = lookup("DB_MAX_POOL_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pool_size);

        let min_pool_size = lookup("DB_MIN_POOL_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_pool_size);

        Self {
            uri: lookup("MONGODB_URI").unwrap_or(defaults.uri),
            database: lookup("DVD_DATABASE").unwrap_or(defaults.database),
            collection: lookup("DVD_COLLECTION").unwrap_or(defaults.collection),
            max_pool_size,
            min_pool_size,
            ..defaults
        }
    }
}

/// MongoDB client wrapper. Opened at startup, shut down on exit.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
    collection: String,
}

impl Database {
    /// Create the client and verify the server answers.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        info!(
            database = %config.database,
            collection = %config.collection,
            max_pool_size = config.max_pool_size,
            "Connecting to database"
        );

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(DbError::Connect)?;
        options.app_name = Some("dvd-catalog".to_string());
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let client = Client::with_options(options).map_err(DbError::Connect)?;
        let db = Self {
            database: client.database(&config.database),
            collection: config.collection.clone(),
            client,
        };

        db.health_check().await?;
        info!("Database connection established");

        Ok(db)
    }

    /// Check if the database is reachable.
    pub async fn health_check(&self) -> Result<(), DbError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(DbError::Query)?;
        Ok(())
    }

    /// Get a film store handle.
    pub fn films(&self) -> MongoFilmStore {
        MongoFilmStore::new(self.database.clone(), &self.collection)
    }

    /// Close pooled connections and wait for in-flight operations.
    pub async fn shutdown(self) {
        info!("Closing database connections");
        self.client.shutdown().await;
    }
}
