//! Server configuration read from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Where aggregates are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local, lost on restart.
    #[default]
    Memory,
    /// `PostgreSQL` document table.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(AppError::Config(format!(
                "STORAGE_BACKEND must be `memory` or `postgres`, got `{other}`"
            ))),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Storage backend.
    pub storage: StorageBackend,
    /// Connection string; present whenever `storage` is `Postgres`.
    pub database_url: Option<String>,
    /// Pool size for the `PostgreSQL` backend.
    pub database_max_connections: u32,
    /// Origins allowed by CORS. Empty allows any origin.
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl Config {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value, or
    /// `DATABASE_URL` is missing while the `postgres` backend is selected.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let storage = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::default(),
        };
        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(AppError::Config(
                "DATABASE_URL must be set when STORAGE_BACKEND is postgres".to_owned(),
            ));
        }
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|e| {
                        AppError::Config(format!(
                            "invalid origin `{origin}` in CORS_ALLOWED_ORIGINS: {e}"
                        ))
                    })
                })
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            database_max_connections,
            cors_allowed_origins,
        })
    }

    /// CORS layer for the configured origins; permissive when none are set.
    #[must_use]
    pub fn cors_layer(&self) -> CorsLayer {
        if self.cors_allowed_origins.is_empty() {
            return CorsLayer::permissive();
        }
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.cors_allowed_origins.clone()))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Address to bind the listener to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
