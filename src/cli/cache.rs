//! `cache` command handlers: locate or empty the catalog response cache.

use crate::catalog::{default_cache_dir, CatalogCache};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Cache the audit would use for `config`, even when caching is disabled.
fn configured_cache(config: &AppConfig) -> CatalogCache {
    let dir = config
        .audit
        .cache_dir
        .clone()
        .unwrap_or_else(default_cache_dir);
    let ttl = Duration::from_secs(config.audit.cache_ttl_hours.saturating_mul(3600));
    CatalogCache::new(dir, ttl)
}

/// Run `cache path`: print the cache directory on stdout.
pub fn run_cache_path(config: &AppConfig) -> Result<i32> {
    println!("{}", configured_cache(config).dir().display());
    Ok(0)
}

/// Run `cache clear`: delete every cached catalog response.
pub fn run_cache_clear(config: &AppConfig) -> Result<i32> {
    let cache = configured_cache(config);
    let removed = cache
        .clear()
        .with_context(|| format!("failed to clear {}", cache.dir().display()))?;
    tracing::info!(
        "Removed {removed} cached catalog response(s) from {}",
        cache.dir().display()
    );
    Ok(0)
}
