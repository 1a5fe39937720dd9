//! Report type definitions.

use crate::model::Severity;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format of a persisted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Json,
    Html,
}

impl ReportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// The persisted outcome of one run.
///
/// Built once, then handed to the sinks. `exit_code` is always derived from
/// `status`; use the constructors rather than building the struct by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Generation time, ISO-8601 local time
    pub timestamp: String,
    /// Pipeline invocation that produced the report
    pub module: String,
    pub status: Severity,
    pub exit_code: i32,
    pub summary: String,
    /// Invocation-specific payload, key order preserved
    pub details: IndexMap<String, Value>,
    pub anomalies: Vec<String>,
}

impl Report {
    /// Create a report stamped with `generated`.
    #[must_use]
    pub fn at(
        generated: NaiveDateTime,
        module: impl Into<String>,
        status: Severity,
        summary: impl Into<String>,
        details: IndexMap<String, Value>,
        anomalies: Vec<String>,
    ) -> Self {
        Self {
            timestamp: generated.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            module: module.into(),
            status,
            exit_code: status.exit_code(),
            summary: summary.into(),
            details,
            anomalies,
        }
    }
}
