//! Configuration module for ntl-systoolbox.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - Environment variable overlay and CLI overrides
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ntl_systoolbox::config::{load_or_default, Validatable};
//!
//! let mut loaded = load_or_default(None);
//! let mut errors = loaded.config.apply_env();
//! errors.extend(loaded.config.validate());
//! ```
//!
//! # Configuration File
//!
//! The toolbox-wide `config/config.yml` is read when present, so the audit
//! section can live next to the other modules' settings:
//!
//! ```yaml
//! reports:
//!   path: ./reports
//! audit:
//!   eol_api: https://endoflife.date/api
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    env, DEFAULT_CACHE_TTL_HOURS, DEFAULT_EOL_API, DEFAULT_LOG_LEVEL, DEFAULT_REPORTS_PATH,
    DEFAULT_TIMEOUT_SECS,
};
pub use types::{
    AppConfig, AuditConfig, ConfigOverrides, LoggingConfig, OutputConfig, ReportsConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, LoadedConfig,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of config files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
