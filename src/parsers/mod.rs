//! Inventory input parsers.
//!
//! ```no_run
//! use ntl_systoolbox::parsers::parse_inventory;
//! use std::path::Path;
//!
//! let entries = parse_inventory(Path::new("inventory.csv")).unwrap();
//! println!("{} hosts", entries.len());
//! ```

mod inventory;

pub use inventory::parse_inventory_str;

use crate::error::{ErrorContext, InventoryErrorKind, Result};
use crate::model::InventoryEntry;
use std::path::Path;

/// Read and parse an inventory CSV file.
///
/// Every failure here is an input error: the whole run is unusable. The
/// error context names the file.
pub fn parse_inventory(path: &Path) -> Result<Vec<InventoryEntry>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| InventoryErrorKind::Unreadable(e.to_string()))
        .with_context(|| path.display().to_string())?;

    let entries = parse_inventory_str(&content).with_context(|| path.display().to_string())?;
    tracing::debug!("Parsed {} inventory entries from {}", entries.len(), path.display());
    Ok(entries)
}
