//! Core data model: severities, inventory entries and catalog records.

mod inventory;
mod lifecycle;
mod severity;

pub use inventory::{
    normalize_product, Classification, ClassifiedEntry, InventoryEntry, ReportGroup,
    NOT_AVAILABLE,
};
pub use lifecycle::{DateOrBool, LifecycleRecord, CATALOG_DATE_FORMAT};
pub use severity::Severity;
