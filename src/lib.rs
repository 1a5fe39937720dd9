//! **End-of-life audit of a deployed-asset inventory.**
//!
//! `ntl-systoolbox` reads a CSV inventory of hosts (IP, hostname, operating
//! system, version), looks every product up in a version-lifecycle catalog
//! ([endoflife.date](https://endoflife.date) by default) and classifies each
//! host as end-of-life, end-of-life soon, supported, or unknown. Every run
//! produces a fixed-schema JSON report, and inventory audits also produce a
//! self-contained HTML document grouping hosts by urgency.
//!
//! ## Modules
//!
//! - **[`parsers`]**: inventory CSV ingestion into [`InventoryEntry`] values.
//! - **[`catalog`]**: the [`LifecycleClient`] seam and its HTTP implementation,
//!   [`EndOfLifeClient`], with an on-disk response cache.
//! - **[`audit`]**: classification against a reference date and the
//!   orchestration producing an [`AuditResult`].
//! - **[`reports`]**: JSON, HTML and console renderings of a [`Report`].
//! - **[`config`]**: layered configuration (defaults, YAML file, environment,
//!   command line).
//!
//! ## Auditing an inventory
//!
//! ```no_run
//! use std::path::Path;
//! use ntl_systoolbox::{parse_inventory, run_audit, CatalogClientConfig, EndOfLifeClient};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let inventory = parse_inventory(Path::new("inventory.csv"))?;
//!     let client = EndOfLifeClient::new(CatalogClientConfig::default())?;
//!
//!     let result = run_audit(inventory, &client, chrono::Local::now().naive_local());
//!     println!("{}", result.summary());
//!     for anomaly in &result.anomalies {
//!         println!("  - {anomaly}");
//!     }
//!     std::process::exit(result.exit_code());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `catalog` (default): HTTP access to the lifecycle catalog and its
//!   response cache. Without it [`EndOfLifeClient`] reports every lookup as a
//!   network failure, which is enough for offline tests against a custom
//!   [`LifecycleClient`].

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines
)]

pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod reports;

// Re-export main types for convenience
pub use audit::{
    classify, list_lifecycle, run_audit, run_audit_with, AuditOptions, AuditResult,
    LifecycleListing,
};
pub use catalog::{CatalogClientConfig, EndOfLifeClient, FetchError, LifecycleClient};
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, InventoryErrorKind, Result, ToolboxError};
pub use model::{
    Classification, ClassifiedEntry, DateOrBool, InventoryEntry, LifecycleRecord, Severity,
};
pub use parsers::{parse_inventory, parse_inventory_str};
pub use reports::{HtmlReporter, JsonReporter, Report, ReportFormat, SummaryReporter};
