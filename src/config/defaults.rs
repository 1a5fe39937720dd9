//! Default values and environment variable names.

/// Default report directory.
pub const DEFAULT_REPORTS_PATH: &str = "./reports";

/// Default lifecycle catalog.
pub const DEFAULT_EOL_API: &str = "https://endoflife.date/api";

/// Default per-request timeout, also the maximum allowed.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default catalog cache lifetime.
pub const DEFAULT_CACHE_TTL_HOURS: u64 = 24;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variables layered over the config file.
pub mod env {
    pub const REPORTS_PATH: &str = "REPORTS_PATH";
    pub const EOL_API_URL: &str = "EOL_API_URL";
    pub const EOL_API_TIMEOUT: &str = "EOL_API_TIMEOUT";
    pub const EOL_CACHE_HOURS: &str = "EOL_CACHE_HOURS";
    pub const LOG_LEVEL: &str = "NTL_LOG_LEVEL";
}
