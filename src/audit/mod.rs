//! End-of-life audits.
//!
//! - [`run_audit`] classifies a whole inventory against a [`LifecycleClient`]
//!   and folds the per-entry results into an [`AuditResult`]
//! - [`list_lifecycle`] lists every cycle of a single product
//!
//! Catalog failures never escape this module as errors: they become
//! classifications (inventory audit) or severities (listing).
//!
//! [`LifecycleClient`]: crate::catalog::LifecycleClient

mod classifier;
mod listing;
mod orchestrator;

pub use classifier::{classify, classify_eol_date, EOL_SOON_HORIZON_DAYS};
pub use listing::{list_lifecycle, LifecycleListing};
pub use orchestrator::{run_audit, run_audit_with, AuditOptions, AuditResult};

/// Module name of inventory audit reports.
pub const INVENTORY_MODULE: &str = "audit_csv_inventory";

/// Module name of lifecycle listing reports.
pub const EOL_LIST_MODULE: &str = "audit_eol_list";
