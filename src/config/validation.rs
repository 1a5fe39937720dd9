//! Configuration validation.

use super::types::{AppConfig, AuditConfig, LoggingConfig, ReportsConfig};
use crate::catalog::MAX_TIMEOUT;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.reports.validate());
        errors.extend(self.audit.validate());
        errors.extend(self.logging.validate());
        errors
    }
}

impl Validatable for ReportsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.path.as_os_str().is_empty() {
            errors.push(ConfigError::new("reports.path", "must not be empty"));
        } else if self.path.is_file() {
            errors.push(ConfigError::new(
                "reports.path",
                format!("{} is a file, not a directory", self.path.display()),
            ));
        }
        errors
    }
}

impl Validatable for AuditConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.eol_api.starts_with("http://") || self.eol_api.starts_with("https://")) {
            errors.push(ConfigError::new(
                "audit.eol_api",
                format!("'{}' must be an http(s) URL", self.eol_api),
            ));
        }

        let max = MAX_TIMEOUT.as_secs();
        if !(1..=max).contains(&self.timeout_secs) {
            errors.push(ConfigError::new(
                "audit.timeout_secs",
                format!("must be between 1 and {max}, got {}", self.timeout_secs),
            ));
        }

        errors
    }
}

impl Validatable for LoggingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if valid_levels.contains(&self.level.to_lowercase().as_str()) {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "logging.level",
                format!(
                    "Invalid level '{}'. Valid options: {}",
                    self.level,
                    valid_levels.join(", ")
                ),
            )]
        }
    }
}
