//! Console result block.
//!
//! Printed to stdout for every run, before the report is persisted, so the
//! outcome is visible even when writing fails.

use super::Report;
use crate::model::Severity;
use serde_json::Value;
use std::fmt::Write;

const RULE_WIDTH: usize = 64;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn status_color(status: Severity) -> &'static str {
    match status {
        Severity::Ok => "green",
        Severity::Warn => "yellow",
        Severity::Crit => "red",
    }
}

/// Console reporter for a finished run
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Render the block for a report.
    ///
    /// Arrays and objects in `details` are shown by size only; the JSON
    /// report carries them in full.
    #[must_use]
    pub fn generate(&self, report: &Report) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        // Writing into a String cannot fail.
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(out, "  Module: {}", self.color(&report.module, "bold"));
        let status = format!("{} {}", report.status.icon(), report.status);
        let _ = writeln!(
            out,
            "  Status: {}",
            self.color(&status, status_color(report.status))
        );
        let _ = writeln!(out, "  Summary: {}", report.summary);

        if !report.anomalies.is_empty() {
            let _ = writeln!(out, "  Anomalies:");
            for anomaly in &report.anomalies {
                let _ = writeln!(out, "    - {}", self.color(anomaly, "yellow"));
            }
        }

        if !report.details.is_empty() {
            let _ = writeln!(out, "  Details:");
            for (key, value) in &report.details {
                let _ = writeln!(out, "    {key}: {}", self.color(&display_value(value), "dim"));
            }
        }

        let _ = writeln!(out, "{rule}");
        out
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        other => other.to_string(),
    }
}
