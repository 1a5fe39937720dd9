//! Version lifecycle catalog access.
//!
//! The audit only depends on the [`LifecycleClient`] trait: given a normalized
//! product identifier it returns that product's release cycles, or a
//! [`FetchError`] saying why it could not. [`EndOfLifeClient`] implements it
//! against the [endoflife.date](https://endoflife.date) API.
//!
//! ```no_run
//! use ntl_systoolbox::catalog::{CatalogClientConfig, EndOfLifeClient, LifecycleClient};
//!
//! let client = EndOfLifeClient::new(CatalogClientConfig::default())?;
//! let cycles = client.fetch_lifecycle("ubuntu")?;
//! println!("{} ubuntu cycles", cycles.len());
//! # Ok::<(), ntl_systoolbox::catalog::FetchError>(())
//! ```

#[cfg(feature = "catalog")]
mod cache;
mod client;

#[cfg(feature = "catalog")]
pub use cache::CatalogCache;
pub use client::{
    default_cache_dir, parse_payload, CatalogClientConfig, EndOfLifeClient, MAX_TIMEOUT,
};

use crate::model::LifecycleRecord;
use thiserror::Error;

/// Why a catalog lookup failed.
///
/// Callers choose their own severity per variant; transport problems are
/// usually transient while a malformed payload points at an API change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    /// Connection, DNS or TLS failure
    #[error("network error: {0}")]
    Network(String),

    /// The bounded request timeout elapsed
    #[error("request timed out")]
    Timeout,

    /// The catalog answered with a non-2xx status
    #[error("catalog returned HTTP {status} for product '{product}'")]
    Status { status: u16, product: String },

    /// The body was not a JSON array of cycle records
    #[error("malformed catalog payload: {0}")]
    Payload(String),
}

impl FetchError {
    /// Whether retrying later could plausibly succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        !matches!(self, Self::Payload(_))
    }
}

/// Source of release-cycle lifecycle records.
///
/// Implementations must bound each request and must not retry internally.
pub trait LifecycleClient: Send + Sync {
    /// Fetch every release cycle known for `product_id`, in catalog order.
    ///
    /// `product_id` is already normalized (lowercase, spaces as hyphens).
    fn fetch_lifecycle(&self, product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError>;

    /// Human-readable name of the data source, credited in reports.
    fn source_name(&self) -> &str {
        "endoflife.date"
    }
}

impl<T: LifecycleClient + ?Sized> LifecycleClient for &T {
    fn fetch_lifecycle(&self, product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
        (**self).fetch_lifecycle(product_id)
    }

    fn source_name(&self) -> &str {
        (**self).source_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Network("refused".into()).is_transient());
        assert!(FetchError::Status {
            status: 503,
            product: "ubuntu".into()
        }
        .is_transient());
        assert!(!FetchError::Payload("expected array".into()).is_transient());
    }

    #[test]
    fn test_status_display_names_product() {
        let err = FetchError::Status {
            status: 404,
            product: "windows-server".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("windows-server"));
    }
}
