//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod audit;
#[cfg(feature = "catalog")]
mod cache;

pub use audit::{
    run_eol_list, run_eol_list_with, run_inventory_audit, run_inventory_audit_with, RunOutcome,
};
#[cfg(feature = "catalog")]
pub use cache::{run_cache_clear, run_cache_path};
