//! Configuration types for ntl-systoolbox.

use super::defaults::{
    DEFAULT_CACHE_TTL_HOURS, DEFAULT_EOL_API, DEFAULT_LOG_LEVEL, DEFAULT_REPORTS_PATH,
    DEFAULT_TIMEOUT_SECS,
};
use crate::audit::AuditOptions;
use crate::catalog::CatalogClientConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration.
///
/// Layered as: defaults, then the YAML file, then environment variables,
/// then command-line flags. Unknown sections (other toolbox modules) are
/// ignored, so one `config.yml` can be shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where reports are written
    pub reports: ReportsConfig,
    /// End-of-life audit settings
    pub audit: AuditConfig,
    /// Log verbosity
    pub logging: LoggingConfig,
    /// Console output
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog client settings derived from the audit section.
    #[must_use]
    pub fn catalog_client_config(&self) -> CatalogClientConfig {
        let defaults = CatalogClientConfig::default();
        CatalogClientConfig {
            base_url: self.audit.eol_api.clone(),
            timeout: Duration::from_secs(self.audit.timeout_secs),
            cache_dir: if self.audit.cache_ttl_hours == 0 {
                None
            } else {
                self.audit.cache_dir.clone().or(defaults.cache_dir)
            },
            cache_ttl: Duration::from_secs(self.audit.cache_ttl_hours * 3600),
            bypass_cache: false,
        }
    }

    /// Options for the inventory audit.
    #[must_use]
    pub const fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            parallel: self.audit.parallel,
        }
    }

    /// Apply command-line overrides, which take precedence over everything.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.reports_dir {
            self.reports.path.clone_from(path);
        }
        if let Some(api) = &overrides.eol_api {
            self.audit.eol_api.clone_from(api);
        }
        if overrides.no_cache {
            self.audit.cache_ttl_hours = 0;
        }
        if overrides.sequential {
            self.audit.parallel = false;
        }
        if overrides.no_color {
            self.output.no_color = true;
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub reports_dir: Option<PathBuf>,
    pub eol_api: Option<String>,
    pub no_cache: bool,
    pub sequential: bool,
    pub no_color: bool,
}

// ============================================================================
// Sections
// ============================================================================

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportsConfig {
    /// Directory receiving JSON and HTML reports, created if missing
    pub path: PathBuf,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORTS_PATH),
        }
    }
}

/// End-of-life audit settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AuditConfig {
    /// Lifecycle catalog base URL
    pub eol_api: String,
    /// Per-request timeout in seconds (1-10)
    pub timeout_secs: u64,
    /// Catalog cache lifetime in hours, 0 disables the cache
    pub cache_ttl_hours: u64,
    /// Catalog cache directory (default: user cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Look up distinct products in parallel
    pub parallel: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            eol_api: DEFAULT_EOL_API.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_ttl_hours: DEFAULT_CACHE_TTL_HOURS,
            cache_dir: None,
            parallel: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Disable ANSI colors in the console block
    pub no_color: bool,
}
