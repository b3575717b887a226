//! HTTP-based `PlaceResolver` backed by Nominatim.
//!
//! This module provides [`NominatimResolver`], an implementation of the
//! [`PlaceResolver`] trait that resolves free-text queries and reverse
//! lookups against a Nominatim instance.
//!
//! # Architecture
//!
//! The [`PlaceResolver`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This resolver bridges the async
//! HTTP calls to the sync interface by blocking on a Tokio runtime it
//! owns. When called from within an existing multi-threaded Tokio
//! runtime (detected via [`Handle::try_current()`]), it uses that
//! runtime's handle with [`tokio::task::block_in_place`] to avoid nested
//! runtime panics; within a `current_thread` runtime it falls back to its
//! own runtime.
//!
//! # Example
//!
//! ```no_run
//! use stopover_core::PlaceResolver;
//! use stopover_data::NominatimResolver;
//!
//! let resolver = NominatimResolver::new("https://nominatim.openstreetmap.org")?;
//! let place = resolver.resolve("india gate delhi")?;
//! println!("{} at {}, {}", place.name, place.location.y, place.location.x);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use stopover_core::{PlaceResolver, ResolveError, ResolvedPlace};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::nominatim::{ReverseReply, SearchHit, place_from_hits, place_from_reverse};

/// Error type for [`NominatimResolver`] construction failures.
#[derive(Debug, Error)]
pub enum ResolverBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for Nominatim requests; the service requires one
/// that identifies the application.
pub const DEFAULT_USER_AGENT: &str = "stopover-geocode/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`NominatimResolver`].
#[derive(Debug, Clone)]
pub struct NominatimResolverConfig {
    /// Base URL of the Nominatim instance.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NominatimResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimResolverConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Place resolver backed by a Nominatim instance.
///
/// Owns its HTTP client and a reusable current-thread Tokio runtime, so
/// repeated lookups pay no per-call construction cost.
pub struct NominatimResolver {
    client: Client,
    config: NominatimResolverConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for NominatimResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NominatimResolver {
    /// Create a resolver with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ResolverBuildError> {
        Self::with_config(NominatimResolverConfig::new(base_url))
    }

    /// Create a resolver with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn with_config(config: NominatimResolverConfig) -> Result<Self, ResolverBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ResolverBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ResolverBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the `/search` URL for a free-text query.
    fn build_search_url(&self, query: &str) -> String {
        let params = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1")
            .append_pair("addressdetails", "0")
            .finish();
        format!(
            "{}/search?{}",
            self.config.base_url.trim_end_matches('/'),
            params
        )
    }

    /// Build the `/reverse` URL for a coordinate.
    fn build_reverse_url(&self, location: Coord<f64>) -> String {
        let params = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("format", "json")
            .append_pair("lat", &location.y.to_string())
            .append_pair("lon", &location.x.to_string())
            .finish();
        format!(
            "{}/reverse?{}",
            self.config.base_url.trim_end_matches('/'),
            params
        )
    }

    async fn fetch_search(&self, query: &str) -> Result<ResolvedPlace, ResolveError> {
        let url = self.build_search_url(query);
        log::debug!("resolving {query:?} via {url}");
        let hits: Vec<SearchHit> = self.get_json(&url).await?;
        place_from_hits(query, hits)
    }

    async fn fetch_reverse(&self, location: Coord<f64>) -> Result<ResolvedPlace, ResolveError> {
        let url = self.build_reverse_url(location);
        log::debug!("reverse lookup via {url}");
        let reply: ReverseReply = self.get_json(&url).await?;
        place_from_reverse(location, reply)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ResolveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        response.json().await.map_err(|err| ResolveError::Parse {
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `ResolveError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ResolveError {
        if error.is_timeout() {
            return ResolveError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ResolveError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
            };
        }

        ResolveError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Run a lookup future to completion from synchronous code.
    ///
    /// `block_in_place` requires a multi-threaded runtime; inside a
    /// `current_thread` runtime the resolver falls back to its own stored
    /// runtime.
    fn block_on<F, T>(&self, future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl PlaceResolver for NominatimResolver {
    fn resolve(&self, query: &str) -> Result<ResolvedPlace, ResolveError> {
        self.block_on(self.fetch_search(query))
    }

    fn reverse(&self, location: Coord<f64>) -> Result<ResolvedPlace, ResolveError> {
        self.block_on(self.fetch_reverse(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn resolver() -> NominatimResolver {
        NominatimResolver::new("https://nominatim.example.com").expect("resolver should build")
    }

    #[rstest]
    fn search_url_encodes_the_query(resolver: NominatimResolver) {
        let url = resolver.build_search_url("india gate, delhi");
        assert_eq!(
            url,
            "https://nominatim.example.com/search?q=india+gate%2C+delhi&format=json&limit=1&addressdetails=0"
        );
    }

    #[rstest]
    fn search_url_strips_trailing_slash() {
        let resolver =
            NominatimResolver::new("https://nominatim.example.com/").expect("resolver should build");
        let url = resolver.build_search_url("museum");
        assert!(url.starts_with("https://nominatim.example.com/search?"));
        assert!(!url.contains("//search"));
    }

    #[rstest]
    fn reverse_url_carries_the_coordinate(resolver: NominatimResolver) {
        let url = resolver.build_reverse_url(Coord { x: 77.2167, y: 28.6315 });
        assert_eq!(
            url,
            "https://nominatim.example.com/reverse?format=json&lat=28.6315&lon=77.2167"
        );
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = NominatimResolverConfig::new("https://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("trip-planner/2.0");

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "trip-planner/2.0");
    }
}
