//! Report sink for audit runs.
//!
//! Every run produces one [`Report`], written as:
//! - JSON: the fixed-schema record consumed by downstream tooling
//! - HTML: a self-contained inventory document (inventory audit only)
//! - Summary: the console block printed before anything is persisted
//!
//! # Security
//!
//! Inventory cells are user-controlled. The `escape` module must be used on
//! every value embedded in HTML.

pub mod escape;
mod html;
mod json;
mod summary;
mod types;

pub use html::{HtmlReporter, HTML_REPORT_PREFIX};
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{Report, ReportFormat};

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Timestamp format used in report file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors that can occur while producing or persisting a report
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    #[error("cannot create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// File name for a report written at `at`.
///
/// Second granularity: a second report for the same prefix within the same
/// second overwrites the first.
#[must_use]
pub fn report_file_name(prefix: &str, format: ReportFormat, at: NaiveDateTime) -> String {
    format!(
        "{prefix}_{}.{}",
        at.format(FILE_TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Write `content` into `dir/file_name`, creating `dir` recursively.
pub(crate) fn write_report_file(
    dir: &Path,
    file_name: &str,
    content: &str,
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    fs::write(&path, content).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Report written to {}", path.display());
    Ok(path)
}
