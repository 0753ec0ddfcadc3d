use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::db::DbConfig;
use crate::films::DEFAULT_FETCH_LIMIT;

/// Which film store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB collection.
    MongoDb,
    /// Process-local store, lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            other => Err(anyhow!("unknown store backend '{other}' (expected mongodb or memory)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub store: StoreBackend,
    pub fetch_limit: usize,
    pub database: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr = lookup("DVD_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .context("DVD_LISTEN_ADDR must be a socket address")?;

        let log_level = lookup("DVD_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let store = match lookup("DVD_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::MongoDb,
        };

        let fetch_limit = match lookup("DVD_FETCH_LIMIT") {
            Some(value) => value
                .parse()
                .context("DVD_FETCH_LIMIT must be a positive integer")?,
            None => DEFAULT_FETCH_LIMIT,
        };
        if fetch_limit == 0 {
            return Err(anyhow!("DVD_FETCH_LIMIT must be a positive integer"));
        }

        let database = DbConfig::from_lookup(&lookup);

        Ok(Self {
            listen_addr,
            log_level,
            store,
            fetch_limit,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.store, StoreBackend::MongoDb);
        assert_eq!(config.fetch_limit, 1000);
        assert_eq!(config.database.database, "dvd_catalog");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DVD_LISTEN_ADDR", "0.0.0.0:9000"),
            ("DVD_STORE", "Memory"),
            ("DVD_FETCH_LIMIT", "50"),
            ("MONGODB_URI", "mongodb://mongo:27017"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.fetch_limit, 50);
        assert_eq!(config.database.uri, "mongodb://mongo:27017");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("DVD_LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("DVD_STORE", "postgres")]).is_err());
        assert!(config_from(&[("DVD_FETCH_LIMIT", "-1")]).is_err());
        assert!(config_from(&[("DVD_FETCH_LIMIT", "0")]).is_err());
    }
}
