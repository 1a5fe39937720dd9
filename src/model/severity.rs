//! Severity levels and their aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health level attached to a single check or to a whole run.
///
/// The derive order is the total order `Ok < Warn < Crit`; aggregation and
/// exit codes depend on it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Nothing to report
    #[default]
    Ok,
    /// Needs attention but not failing
    Warn,
    /// Failing
    Crit,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 3] = [Self::Ok, Self::Warn, Self::Crit];

    /// Reduce a sequence of severities to the worst one.
    ///
    /// An empty sequence is `Ok`.
    pub fn aggregate<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        severities.into_iter().max().unwrap_or_default()
    }

    /// Process exit code for this severity: `Ok`→0, `Warn`→1, `Crit`→2.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warn => 1,
            Self::Crit => 2,
        }
    }

    /// Tag used in persisted reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Crit => "CRIT",
        }
    }

    /// Icon for console display
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✅",
            Self::Warn => "⚠️ ",
            Self::Crit => "❌",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Severity::Ok < Severity::Warn);
        assert!(Severity::Warn < Severity::Crit);
    }

    #[test]
    fn test_aggregate_empty_is_ok() {
        assert_eq!(Severity::aggregate(Vec::new()), Severity::Ok);
    }

    #[test]
    fn test_aggregate_picks_worst() {
        use Severity::{Crit, Ok, Warn};
        assert_eq!(Severity::aggregate([Ok, Ok]), Ok);
        assert_eq!(Severity::aggregate([Ok, Warn, Ok]), Warn);
        assert_eq!(Severity::aggregate([Warn, Crit, Ok]), Crit);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Severity::Ok.exit_code(), 0);
        assert_eq!(Severity::Warn.exit_code(), 1);
        assert_eq!(Severity::Crit.exit_code(), 2);
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"WARN\"");
        let parsed: Severity = serde_json::from_str("\"CRIT\"").unwrap();
        assert_eq!(parsed, Severity::Crit);
    }
}
