//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::{CountriesClient, CountriesError};
use crate::view_cache::ViewCache;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    views: ViewCache,
    countries: CountriesClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the countries HTTP client cannot be built.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, CountriesError> {
        let views = ViewCache::new(config.view_cache_ttl);
        let countries = CountriesClient::new(config.countries_url.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                views,
                countries,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Cached read views.
    #[must_use]
    pub fn views(&self) -> &ViewCache {
        &self.inner.views
    }

    #[must_use]
    pub fn countries(&self) -> &CountriesClient {
        &self.inner.countries
    }
}
