//! Country list lookup.
//!
//! The list comes from a public REST endpoint and is cached for a day; the
//! whole response is one cache entry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Cached list lifetime (24 hours).
const COUNTRIES_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Upstream request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the countries API.
#[derive(Debug, Error)]
pub enum CountriesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("countries API returned {status}")]
    Status { status: u16 },
}

/// A country as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
}

/// Client for the upstream country list.
#[derive(Clone)]
pub struct CountriesClient {
    inner: Arc<CountriesClientInner>,
}

struct CountriesClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<(), Arc<Vec<Country>>>,
}

impl CountriesClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `CountriesError::Http` if the HTTP client cannot be built.
    pub fn new(endpoint: Url) -> Result<Self, CountriesError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(COUNTRIES_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CountriesClientInner {
                client,
                endpoint,
                cache,
            }),
        })
    }

    /// Countries sorted by name, from cache when fresh.
    ///
    /// Failed fetches are not cached.
    ///
    /// # Errors
    ///
    /// Returns `CountriesError` if the upstream request fails.
    pub async fn list(&self) -> Result<Arc<Vec<Country>>, CountriesError> {
        if let Some(countries) = self.inner.cache.get(&()).await {
            return Ok(countries);
        }

        let countries = Arc::new(self.fetch().await?);
        self.inner.cache.insert((), Arc::clone(&countries)).await;
        Ok(countries)
    }

    async fn fetch(&self) -> Result<Vec<Country>, CountriesError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, endpoint = %self.inner.endpoint, "Countries API returned non-success status");
            return Err(CountriesError::Status {
                status: status.as_u16(),
            });
        }

        let mut countries: Vec<Country> = response.json().await?;
        countries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(count = countries.len(), "Fetched country list");
        Ok(countries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_country_flag_is_optional() {
        let parsed: Vec<Country> =
            serde_json::from_str(r#"[{"name":"Chile","flag":"https://flags/cl.svg"},{"name":"Niue"}]"#)
                .unwrap();
        assert_eq!(parsed[0].flag.as_deref(), Some("https://flags/cl.svg"));
        assert_eq!(parsed[1].flag, None);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_an_error() {
        let client = CountriesClient::new(Url::parse("http://127.0.0.1:9/countries").unwrap()).unwrap();
        assert!(client.list().await.is_err());
    }
}
