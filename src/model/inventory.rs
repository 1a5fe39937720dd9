//! Inventory entries and their end-of-life classification.

use super::Severity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for an EOL date that is not known.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the deployed-asset inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Network identity (IP address), free-form
    pub ip: String,
    /// Host name, free-form
    pub hostname: String,
    /// Product as written in the inventory (e.g., "Windows Server")
    pub os: String,
    /// Release cycle identifier, compared verbatim against catalog cycles
    pub version: String,
    /// Any other inventory columns, in source order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

impl InventoryEntry {
    /// Create an entry from its four identity fields.
    pub fn new(
        ip: impl Into<String>,
        hostname: impl Into<String>,
        os: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            hostname: hostname.into(),
            os: os.into(),
            version: version.into(),
            extra: IndexMap::new(),
        }
    }

    /// Catalog product identifier for this entry.
    #[must_use]
    pub fn product_id(&self) -> String {
        normalize_product(&self.os)
    }
}

/// Normalize a product name into a catalog identifier.
///
/// `"Windows Server"` → `"windows-server"`.
#[must_use]
pub fn normalize_product(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

/// Outcome of classifying one inventory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// EOL date is today or in the past
    EndOfLife,
    /// EOL date is less than 180 days away
    EndOfLifeSoon,
    /// No EOL announced, or EOL at least 180 days away
    Supported,
    /// The catalog has no cycle equal to the entry's version
    VersionNotFound,
    /// The catalog lookup failed
    ClassificationError,
}

impl Classification {
    /// All classifications in report order.
    pub const ALL: [Self; 5] = [
        Self::EndOfLife,
        Self::EndOfLifeSoon,
        Self::Supported,
        Self::VersionNotFound,
        Self::ClassificationError,
    ];

    /// Severity contributed by one entry with this classification.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::EndOfLife => Severity::Crit,
            Self::EndOfLifeSoon | Self::VersionNotFound | Self::ClassificationError => {
                Severity::Warn
            }
            Self::Supported => Severity::Ok,
        }
    }

    /// Report section this classification is rendered in.
    #[must_use]
    pub const fn group(self) -> ReportGroup {
        match self {
            Self::EndOfLife => ReportGroup::EndOfLife,
            Self::EndOfLifeSoon => ReportGroup::EndOfLifeSoon,
            Self::Supported | Self::VersionNotFound | Self::ClassificationError => {
                ReportGroup::Other
            }
        }
    }

    /// Status label written into reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EndOfLife => "EOL",
            Self::EndOfLifeSoon => "EOL Soon (<6 mois)",
            Self::Supported => "Supported",
            Self::VersionNotFound => "Version non trouvée",
            Self::ClassificationError => "Erreur API",
        }
    }

    /// Stable key used in JSON details.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::EndOfLife => "end_of_life",
            Self::EndOfLifeSoon => "end_of_life_soon",
            Self::Supported => "supported",
            Self::VersionNotFound => "version_not_found",
            Self::ClassificationError => "classification_error",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three sections of an inventory report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportGroup {
    EndOfLife,
    EndOfLifeSoon,
    /// Supported, version-not-found and lookup errors together
    Other,
}

/// An inventory entry with its classification attached.
///
/// Built exactly once per audit run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    pub entry: InventoryEntry,
    pub classification: Classification,
    /// Authoritative EOL date, the raw catalog string, or [`NOT_AVAILABLE`]
    pub eol_date: String,
    /// Lookup failure text, or a note about an unparsable EOL date
    pub error: Option<String>,
}

impl ClassifiedEntry {
    /// Severity contributed by this entry.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.classification.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_product() {
        assert_eq!(normalize_product("Windows Server"), "windows-server");
        assert_eq!(normalize_product("  Ubuntu "), "ubuntu");
        assert_eq!(normalize_product("red hat enterprise linux"), "red-hat-enterprise-linux");
    }

    #[test]
    fn test_product_id_uses_os_column() {
        let entry = InventoryEntry::new("10.0.0.1", "srv-dc01", "Windows Server", "2019");
        assert_eq!(entry.product_id(), "windows-server");
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Classification::EndOfLife.severity(), Severity::Crit);
        assert_eq!(Classification::EndOfLifeSoon.severity(), Severity::Warn);
        assert_eq!(Classification::VersionNotFound.severity(), Severity::Warn);
        assert_eq!(Classification::ClassificationError.severity(), Severity::Warn);
        assert_eq!(Classification::Supported.severity(), Severity::Ok);
    }

    #[test]
    fn test_grouping() {
        assert_eq!(Classification::EndOfLife.group(), ReportGroup::EndOfLife);
        assert_eq!(Classification::EndOfLifeSoon.group(), ReportGroup::EndOfLifeSoon);
        for other in [
            Classification::Supported,
            Classification::VersionNotFound,
            Classification::ClassificationError,
        ] {
            assert_eq!(other.group(), ReportGroup::Other);
        }
    }

    #[test]
    fn test_classification_serializes_as_key() {
        for c in Classification::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.key()));
        }
    }
}
