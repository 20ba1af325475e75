//! Database configuration resolved from the process environment.

use crate::todo::adapters::postgres::TodoPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::num::NonZeroU32;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TODO_DATABASE_URL";

/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "TODO_DATABASE_POOL_SIZE";

/// Pool size used when [`POOL_SIZE_VAR`] is unset.
pub const DEFAULT_POOL_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// Errors raised while resolving configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("{name} has invalid value {value:?}: expected a positive integer")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    max_pool_size: NonZeroU32,
}

impl DatabaseConfig {
    /// Creates a configuration with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Overrides the maximum pool size.
    #[must_use]
    pub const fn with_max_pool_size(mut self, max_pool_size: NonZeroU32) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the URL is unset and
    /// [`ConfigError::Invalid`] when the pool size is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let max_pool_size = match lookup(POOL_SIZE_VAR) {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => raw
                .trim()
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::Invalid {
                    name: POOL_SIZE_VAR,
                    value: raw.clone(),
                })?,
        };

        Ok(Self { url, max_pool_size })
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn max_pool_size(&self) -> NonZeroU32 {
        self.max_pool_size
    }

    /// Builds an r2d2 connection pool for the `PostgreSQL` adapter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when no connection can be established.
    pub fn build_pool(&self) -> Result<TodoPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.url);
        let pool = Pool::builder()
            .max_size(self.max_pool_size.get())
            .build(manager)?;
        tracing::debug!(max_pool_size = self.max_pool_size.get(), "database pool ready");
        Ok(pool)
    }
}
