//! Release-cycle records as served by the lifecycle catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar date format used by the catalog.
pub const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Union type for catalog fields that can be a date string or boolean.
///
/// The catalog returns `"eol": "2025-04-30"` or `"eol": true` or `"eol": false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOrBool {
    /// A date string (e.g., "2025-04-30"), kept raw so unparsable values survive
    Date(String),
    /// A boolean; `false` means no date announced
    Bool(bool),
}

impl DateOrBool {
    /// Parse as a `NaiveDate`, if the value is a well-formed date string.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(s) => NaiveDate::parse_from_str(s, CATALOG_DATE_FORMAT).ok(),
            Self::Bool(_) => None,
        }
    }

    /// Raw JSON-ish rendering, for reports.
    #[must_use]
    pub fn to_display(&self) -> String {
        match self {
            Self::Date(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// A release cycle of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRecord {
    /// Release cycle identifier (e.g., "20.04", "2019")
    #[serde(deserialize_with = "string_or_number")]
    pub cycle: String,
    /// Release date of this cycle
    #[serde(default)]
    pub release_date: Option<String>,
    /// EOL date or flag; absent means no EOL announced
    #[serde(default)]
    pub eol: Option<DateOrBool>,
    /// LTS flag or LTS start date
    #[serde(default)]
    pub lts: Option<DateOrBool>,
    /// Active support end flag or date
    #[serde(default)]
    pub support: Option<DateOrBool>,
    /// Latest version in this cycle
    #[serde(default)]
    pub latest: Option<String>,
}

impl LifecycleRecord {
    /// Create a record with only a cycle and an EOL value.
    #[must_use]
    pub fn new(cycle: impl Into<String>, eol: Option<DateOrBool>) -> Self {
        Self {
            cycle: cycle.into(),
            release_date: None,
            eol,
            lts: None,
            support: None,
            latest: None,
        }
    }
}

/// Catalog cycles are usually strings but a few products serve bare numbers.
///
/// Numbers keep their JSON spelling as far as `serde_json::Number` carries
/// it, so `8.0` stays `"8.0"` and `2019` stays `"2019"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
