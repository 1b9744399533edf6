//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

use crate::repository::CachePolicy;

/// Which cache connector the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("Unknown cache backend: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// MySQL connection URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections
    pub db_max_connections: u32,
    /// Cache connector to use
    pub cache_backend: CacheBackend,
    /// Redis connection URL
    pub redis_url: String,
    /// TTL in seconds for entries cached on the read paths
    pub cache_ttl: u64,
    /// TTL in seconds for entries overwritten after a write; `None` = no expiry
    pub cache_write_ttl: Option<u64>,
    /// Drop the cached listing on every create/update/delete
    pub invalidate_listing_on_write: bool,
    /// Memory-cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - MySQL URL, or built from `MYSQL_HOST`, `MYSQL_USER`,
    ///   `MYSQL_PASSWORD` and `MYSQL_DATABASE` when `MYSQL_HOST` is set
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `CACHE_TTL` - Read-path TTL in seconds (default: 3600)
    /// - `CACHE_WRITE_TTL` - Post-write TTL in seconds (default: none)
    /// - `CACHE_INVALIDATE_LISTING` - `true` to drop the listing on writes (default: false)
    /// - `CLEANUP_INTERVAL` - Memory-cache sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").ok().or_else(mysql_url_from_parts),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_write_ttl: parse_var("CACHE_WRITE_TTL"),
            invalidate_listing_on_write: parse_var("CACHE_INVALIDATE_LISTING")
                .unwrap_or(defaults.invalidate_listing_on_write),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Cache behavior the repository should follow.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            read_ttl_secs: self.cache_ttl,
            write_ttl_secs: self.cache_write_ttl,
            invalidate_listing_on_write: self.invalidate_listing_on_write,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            db_max_connections: 10,
            cache_backend: CacheBackend::Redis,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            cache_ttl: 3600,
            cache_write_ttl: None,
            invalidate_listing_on_write: false,
            cleanup_interval: 1,
        }
    }
}

/// Reads `name` from the environment. Unset yields `None` quietly; a value
/// that does not parse is logged and also yields `None`.
fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    env::var(name).ok().and_then(|raw| parse_value(name, &raw))
}

fn parse_value<T>(name: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}; using the default", name, raw, e);
            None
        }
    }
}

fn mysql_url_from_parts() -> Option<String> {
    let host = env::var("MYSQL_HOST").ok()?;
    let user = env::var("MYSQL_USER").unwrap_or_else(|_| "root".to_string());
    let password = env::var("MYSQL_PASSWORD").unwrap_or_default();
    let database = env::var("MYSQL_DATABASE").unwrap_or_default();

    let credentials = if password.is_empty() {
        user
    } else {
        format!("{}:{}", user, password)
    };
    Some(format!("mysql://{}@{}/{}", credentials, host, database))
}
