//! JSON report writer.

use super::{report_file_name, write_report_file, Report, ReportError, ReportFormat};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// JSON report writer. Output is always pretty-printed.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Serialize a report. Every key is emitted, empty or not.
    pub fn generate(&self, report: &Report) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize(e.to_string()))
    }

    /// Write `{module}_{YYYYMMDD_HHMMSS}.json` into `output_dir`, stamped
    /// with the write time `at`.
    pub fn write_at(
        &self,
        report: &Report,
        output_dir: &Path,
        at: NaiveDateTime,
    ) -> Result<PathBuf, ReportError> {
        let content = self.generate(report)?;
        let name = report_file_name(&report.module, ReportFormat::Json, at);
        write_report_file(output_dir, &name, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use indexmap::IndexMap;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn stamp() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_empty_values_keep_their_keys() {
        let report = Report::at(
            stamp(),
            "audit_eol_list",
            Severity::Ok,
            "",
            IndexMap::new(),
            Vec::new(),
        );
        let value: Value = serde_json::from_str(&JsonReporter::new().generate(&report).unwrap()).unwrap();

        let object = value.as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys.len(),
            7,
            "unexpected key set: {keys:?}"
        );
        for key in ["timestamp", "module", "status", "exit_code", "summary", "details", "anomalies"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(value["status"], "OK");
        assert_eq!(value["exit_code"], 0);
        assert_eq!(value["details"], json!({}));
        assert_eq!(value["anomalies"], json!([]));
    }

    #[test]
    fn test_write_and_read_back() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("reports");

        let mut details = IndexMap::new();
        details.insert("csv_file".to_string(), json!("inventory.csv"));
        details.insert("entries".to_string(), json!([{"ip": "10.0.0.1", "error": null}]));
        let report = Report::at(
            stamp(),
            "audit_csv_inventory",
            Severity::Warn,
            "Audit terminé: 0 EOL, 1 EOL Soon, 0 OK",
            details.clone(),
            vec!["1 serveurs bientôt EOL (<6 mois)".into()],
        );

        let path = JsonReporter::new().write_at(&report, &out, stamp()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(name, "audit_csv_inventory_20240305_140709.json");

        let parsed: Report = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.details, details);
    }
}
