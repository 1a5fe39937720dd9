//! HTTP client for the endoflife.date API.

use super::{FetchError, LifecycleClient};
use crate::model::LifecycleRecord;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "catalog")]
use super::CatalogCache;

/// Upper bound for a single catalog request.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL for the API; products are fetched from `{base_url}/{product}.json`
    pub base_url: String,
    /// HTTP request timeout, capped at [`MAX_TIMEOUT`]
    pub timeout: Duration,
    /// Cache directory; `None` disables caching
    pub cache_dir: Option<PathBuf>,
    /// Cache TTL for per-product cycle data
    pub cache_ttl: Duration,
    /// Bypass cache reads and fetch fresh data
    pub bypass_cache: bool,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://endoflife.date/api".to_string(),
            timeout: MAX_TIMEOUT,
            cache_dir: Some(default_cache_dir()),
            cache_ttl: Duration::from_secs(24 * 3600), // 24 hours
            bypass_cache: false,
        }
    }
}

impl CatalogClientConfig {
    /// Timeout actually applied to requests.
    #[must_use]
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.min(MAX_TIMEOUT)
    }

    /// URL serving the cycles of one product.
    #[must_use]
    pub fn product_url(&self, product: &str) -> String {
        format!("{}/{product}.json", self.base_url.trim_end_matches('/'))
    }
}

/// Per-user cache directory for catalog responses.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("ntl-systoolbox")
        .join("eol")
}

// ============================================================================
// Client
// ============================================================================

/// Blocking client for the endoflife.date API with optional file caching.
pub struct EndOfLifeClient {
    config: CatalogClientConfig,
    #[cfg(feature = "catalog")]
    http: reqwest::blocking::Client,
    #[cfg(feature = "catalog")]
    cache: Option<CatalogCache>,
}

impl EndOfLifeClient {
    /// Create a client. Fails only if the HTTP stack cannot be initialized.
    #[cfg(feature = "catalog")]
    pub fn new(config: CatalogClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(concat!("ntl-systoolbox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let cache = config
            .cache_dir
            .clone()
            .filter(|_| !config.cache_ttl.is_zero())
            .map(|dir| CatalogCache::new(dir, config.cache_ttl));

        Ok(Self {
            config,
            http,
            cache,
        })
    }

    #[cfg(not(feature = "catalog"))]
    pub fn new(config: CatalogClientConfig) -> Result<Self, FetchError> {
        Ok(Self { config })
    }

    /// Client configuration
    #[must_use]
    pub const fn config(&self) -> &CatalogClientConfig {
        &self.config
    }

    #[cfg(feature = "catalog")]
    fn fetch_remote(&self, product: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
        let url = self.config.product_url(product);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                product: product.to_string(),
            });
        }

        let body = response.text().map_err(transport_error)?;
        parse_payload(&body)
    }
}

#[cfg(feature = "catalog")]
impl LifecycleClient for EndOfLifeClient {
    fn fetch_lifecycle(&self, product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
        let base = self.config.base_url.as_str();

        if let Some(cache) = self.cache.as_ref().filter(|_| !self.config.bypass_cache) {
            if let Some(records) = cache.get(base, product_id) {
                tracing::debug!("cache hit for '{product_id}'");
                return Ok(records);
            }
        }

        let records = self.fetch_remote(product_id)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(base, product_id, &records) {
                tracing::warn!("Failed to cache cycles for '{product_id}': {e}");
            }
        }
        Ok(records)
    }
}

#[cfg(not(feature = "catalog"))]
impl LifecycleClient for EndOfLifeClient {
    fn fetch_lifecycle(&self, _product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
        Err(FetchError::Network(
            "catalog feature not enabled".to_string(),
        ))
    }
}

#[cfg(feature = "catalog")]
fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err.to_string())
    }
}

/// Decode a catalog response body.
///
/// Anything other than a JSON array of objects carrying a `cycle` is a
/// [`FetchError::Payload`].
pub fn parse_payload(body: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateOrBool;

    #[test]
    fn test_default_config() {
        let config = CatalogClientConfig::default();
        assert_eq!(config.base_url, "https://endoflife.date/api");
        assert_eq!(config.effective_timeout(), Duration::from_secs(10));
        assert!(config.cache_dir.is_some());
    }

    #[test]
    fn test_timeout_is_capped() {
        let config = CatalogClientConfig {
            timeout: Duration::from_secs(60),
            ..CatalogClientConfig::default()
        };
        assert_eq!(config.effective_timeout(), MAX_TIMEOUT);
    }

    #[test]
    fn test_product_url() {
        let mut config = CatalogClientConfig::default();
        assert_eq!(
            config.product_url("ubuntu"),
            "https://endoflife.date/api/ubuntu.json"
        );
        config.base_url = "http://127.0.0.1:8080/api/".to_string();
        assert_eq!(
            config.product_url("windows-server"),
            "http://127.0.0.1:8080/api/windows-server.json"
        );
    }

    #[test]
    fn test_parse_payload() {
        let body = r#"[
            {"cycle": "22.04", "eol": "2027-04-01", "lts": true},
            {"cycle": "20.04", "eol": false}
        ]"#;
        let records = parse_payload(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cycle, "22.04");
        assert_eq!(records[1].eol, Some(DateOrBool::Bool(false)));
    }

    #[test]
    fn test_parse_payload_rejects_object() {
        let err = parse_payload(r#"{"message": "Product not found"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[test]
    fn test_parse_payload_rejects_garbage() {
        assert!(matches!(
            parse_payload("<html>oops</html>"),
            Err(FetchError::Payload(_))
        ));
    }
}
