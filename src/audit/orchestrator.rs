//! Inventory audit: classify every entry and fold the results.

use super::classifier::classify;
use crate::catalog::{FetchError, LifecycleClient};
use crate::model::{
    Classification, ClassifiedEntry, InventoryEntry, LifecycleRecord, ReportGroup, Severity,
};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{json, Value};
use std::path::Path;

/// Options for an audit run.
#[derive(Debug, Clone, Copy)]
pub struct AuditOptions {
    /// Run catalog lookups on the rayon pool
    pub parallel: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Audit an inventory with default options.
pub fn run_audit<C>(inventory: Vec<InventoryEntry>, client: &C, now: NaiveDateTime) -> AuditResult
where
    C: LifecycleClient + ?Sized,
{
    run_audit_with(inventory, client, now, AuditOptions::default())
}

/// Audit an inventory.
///
/// Each distinct product is fetched once and its outcome shared by every
/// entry of that product. A failed lookup only affects the entries of that
/// product. Entries come back in inventory order whatever the completion
/// order of the lookups.
pub fn run_audit_with<C>(
    inventory: Vec<InventoryEntry>,
    client: &C,
    now: NaiveDateTime,
    options: AuditOptions,
) -> AuditResult
where
    C: LifecycleClient + ?Sized,
{
    let mut by_product: IndexMap<String, Vec<(usize, InventoryEntry)>> = IndexMap::new();
    for (idx, entry) in inventory.into_iter().enumerate() {
        by_product
            .entry(entry.product_id())
            .or_default()
            .push((idx, entry));
    }
    let batches: Vec<_> = by_product.into_iter().collect();

    tracing::info!(
        "Auditing {} entries across {} products",
        batches.iter().map(|(_, e)| e.len()).sum::<usize>(),
        batches.len()
    );

    let mut classified: Vec<(usize, ClassifiedEntry)> = if options.parallel {
        batches
            .into_par_iter()
            .flat_map_iter(|(product, entries)| classify_batch(client, &product, entries, now))
            .collect()
    } else {
        batches
            .into_iter()
            .flat_map(|(product, entries)| classify_batch(client, &product, entries, now))
            .collect()
    };
    classified.sort_by_key(|(idx, _)| *idx);

    AuditResult::from_entries(classified.into_iter().map(|(_, c)| c).collect(), now)
}

fn classify_batch<C>(
    client: &C,
    product: &str,
    entries: Vec<(usize, InventoryEntry)>,
    now: NaiveDateTime,
) -> Vec<(usize, ClassifiedEntry)>
where
    C: LifecycleClient + ?Sized,
{
    let outcome = lookup(client, product);
    entries
        .into_iter()
        .map(|(idx, entry)| (idx, classify(entry, outcome.as_deref(), now)))
        .collect()
}

fn lookup<C>(client: &C, product: &str) -> Result<Vec<LifecycleRecord>, FetchError>
where
    C: LifecycleClient + ?Sized,
{
    tracing::debug!("Looking up '{product}' on {}", client.source_name());
    let outcome = client.fetch_lifecycle(product);
    match &outcome {
        Ok(records) => tracing::debug!("'{product}': {} cycles", records.len()),
        Err(e) => tracing::warn!("Lookup failed for '{product}': {e}"),
    }
    outcome
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of an inventory audit.
#[derive(Debug, Clone)]
pub struct AuditResult {
    /// Classified entries in inventory order
    pub entries: Vec<ClassifiedEntry>,
    /// Aggregate severity over all entries
    pub status: Severity,
    /// Group count lines, EndOfLife first
    pub anomalies: Vec<String>,
    /// Clock used for classification
    pub evaluated_at: NaiveDateTime,
}

impl AuditResult {
    /// Fold classified entries into a result.
    #[must_use]
    pub fn from_entries(entries: Vec<ClassifiedEntry>, evaluated_at: NaiveDateTime) -> Self {
        let status = Severity::aggregate(entries.iter().map(ClassifiedEntry::severity));

        let mut result = Self {
            entries,
            status,
            anomalies: Vec::new(),
            evaluated_at,
        };

        let eol = result.count(ReportGroup::EndOfLife);
        if eol > 0 {
            result
                .anomalies
                .push(format!("{eol} serveurs en fin de vie détectés"));
        }
        let soon = result.count(ReportGroup::EndOfLifeSoon);
        if soon > 0 {
            result
                .anomalies
                .push(format!("{soon} serveurs bientôt EOL (<6 mois)"));
        }
        result
    }

    /// Entries of one report section, in inventory order.
    pub fn group(&self, group: ReportGroup) -> impl Iterator<Item = &ClassifiedEntry> {
        self.entries
            .iter()
            .filter(move |e| e.classification.group() == group)
    }

    /// Number of entries in one report section.
    #[must_use]
    pub fn count(&self, group: ReportGroup) -> usize {
        self.group(group).count()
    }

    /// Per-classification counts, every classification present.
    #[must_use]
    pub fn classification_counts(&self) -> IndexMap<Classification, usize> {
        Classification::ALL
            .into_iter()
            .map(|c| {
                let n = self.entries.iter().filter(|e| e.classification == c).count();
                (c, n)
            })
            .collect()
    }

    /// Exit code of the run.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Audit terminé: {} EOL, {} EOL Soon, {} OK",
            self.count(ReportGroup::EndOfLife),
            self.count(ReportGroup::EndOfLifeSoon),
            self.count(ReportGroup::Other)
        )
    }

    /// Report details, in a stable key order.
    ///
    /// `html_report` is `null` when no HTML document was written.
    #[must_use]
    pub fn details(&self, csv_file: &Path, html_report: Option<&Path>) -> IndexMap<String, Value> {
        let mut details = IndexMap::new();
        details.insert("csv_file".into(), json!(csv_file.display().to_string()));
        details.insert("inventory_count".into(), json!(self.entries.len()));
        details.insert(
            "evaluated_at".into(),
            json!(self.evaluated_at.format("%Y-%m-%dT%H:%M:%S").to_string()),
        );
        details.insert("eol_count".into(), json!(self.count(ReportGroup::EndOfLife)));
        details.insert(
            "eol_soon_count".into(),
            json!(self.count(ReportGroup::EndOfLifeSoon)),
        );
        details.insert(
            "supported_count".into(),
            json!(self.count(ReportGroup::Other)),
        );

        let counts: serde_json::Map<String, Value> = self
            .classification_counts()
            .into_iter()
            .map(|(c, n)| (c.key().to_string(), json!(n)))
            .collect();
        details.insert("classification_counts".into(), Value::Object(counts));

        let entries: Vec<Value> = self.entries.iter().map(entry_details).collect();
        details.insert("entries".into(), Value::Array(entries));

        details.insert(
            "html_report".into(),
            html_report.map_or(Value::Null, |p| json!(p.display().to_string())),
        );
        details
    }
}

fn entry_details(c: &ClassifiedEntry) -> Value {
    let mut value = json!({
        "ip": c.entry.ip,
        "hostname": c.entry.hostname,
        "os": c.entry.os,
        "version": c.entry.version,
        "product": c.entry.product_id(),
        "classification": c.classification,
        "status": c.classification.label(),
        "severity": c.severity(),
        "eol_date": c.eol_date,
        "error": c.error,
    });
    if !c.entry.extra.is_empty() {
        value["extra"] = json!(c.entry.extra);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DateOrBool;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Catalog {
        products: HashMap<String, Result<Vec<LifecycleRecord>, FetchError>>,
        calls: Mutex<Vec<String>>,
    }

    impl Catalog {
        fn new() -> Self {
            Self {
                products: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with(mut self, product: &str, records: &[(&str, &str)]) -> Self {
            let records = records
                .iter()
                .map(|(cycle, eol)| {
                    LifecycleRecord::new(*cycle, Some(DateOrBool::Date((*eol).to_string())))
                })
                .collect();
            self.products.insert(product.to_string(), Ok(records));
            self
        }

        fn failing(mut self, product: &str, err: FetchError) -> Self {
            self.products.insert(product.to_string(), Err(err));
            self
        }
    }

    impl LifecycleClient for Catalog {
        fn fetch_lifecycle(&self, product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
            self.calls.lock().unwrap().push(product_id.to_string());
            self.products
                .get(product_id)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Status {
                    status: 404,
                    product: product_id.to_string(),
                }))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn entry(host: &str, os: &str, version: &str) -> InventoryEntry {
        InventoryEntry::new("10.0.0.1", host, os, version)
    }

    #[test]
    fn test_empty_inventory() {
        let result = run_audit(Vec::new(), &Catalog::new(), now());
        assert_eq!(result.status, Severity::Ok);
        assert_eq!(result.exit_code(), 0);
        assert!(result.anomalies.is_empty());
        assert_eq!(result.summary(), "Audit terminé: 0 EOL, 0 EOL Soon, 0 OK");
    }

    #[test]
    fn test_mixed_inventory() {
        let catalog = Catalog::new()
            .with("ubuntu", &[("20.04", "2020-01-01"), ("22.04", "2024-03-01")])
            .with("debian", &[("12", "2028-06-10")]);
        let inventory = vec![
            entry("a", "Ubuntu", "20.04"),
            entry("b", "ubuntu", "22.04"),
            entry("c", "Debian", "12"),
            entry("d", "Debian", "9"),
        ];

        let result = run_audit(inventory, &catalog, now());
        let hosts: Vec<_> = result.entries.iter().map(|e| e.entry.hostname.as_str()).collect();
        assert_eq!(hosts, ["a", "b", "c", "d"]);
        assert_eq!(result.status, Severity::Crit);
        assert_eq!(result.count(ReportGroup::EndOfLife), 1);
        assert_eq!(result.count(ReportGroup::EndOfLifeSoon), 1);
        assert_eq!(result.count(ReportGroup::Other), 2);
        assert_eq!(
            result.anomalies,
            [
                "1 serveurs en fin de vie détectés",
                "1 serveurs bientôt EOL (<6 mois)"
            ]
        );
    }

    #[test]
    fn test_each_product_fetched_once() {
        let catalog = Catalog::new().with("ubuntu", &[("22.04", "2027-04-01")]);
        let inventory = vec![
            entry("a", "Ubuntu", "22.04"),
            entry("b", "ubuntu", "22.04"),
            entry("c", " UBUNTU ", "22.04"),
        ];
        let result = run_audit(inventory, &catalog, now());
        assert_eq!(result.entries.len(), 3);
        assert_eq!(*catalog.calls.lock().unwrap(), ["ubuntu"]);
    }

    #[test]
    fn test_lookup_failure_is_isolated() {
        let catalog = Catalog::new()
            .with("debian", &[("12", "2028-06-10")])
            .failing("ubuntu", FetchError::Timeout);
        let inventory = vec![entry("a", "ubuntu", "20.04"), entry("b", "debian", "12")];

        let result = run_audit_with(inventory, &catalog, now(), AuditOptions { parallel: false });
        assert_eq!(
            result.entries[0].classification,
            Classification::ClassificationError
        );
        assert_eq!(result.entries[1].classification, Classification::Supported);
        assert_eq!(result.status, Severity::Warn);
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = Catalog::new()
            .with("ubuntu", &[("20.04", "2020-01-01")])
            .with("debian", &[("12", "2024-02-01")])
            .failing("centos", FetchError::Network("refused".into()));
        let inventory: Vec<_> = (0..40)
            .map(|i| {
                let os = ["ubuntu", "debian", "centos", "windows"][i % 4];
                entry(&format!("h{i}"), os, if i % 4 == 0 { "20.04" } else { "12" })
            })
            .collect();

        let seq = run_audit_with(inventory.clone(), &catalog, now(), AuditOptions { parallel: false });
        let par = run_audit_with(inventory, &catalog, now(), AuditOptions { parallel: true });
        assert_eq!(seq.entries, par.entries);
        assert_eq!(seq.status, par.status);
        assert_eq!(seq.anomalies, par.anomalies);
    }

    #[test]
    fn test_details_shape() {
        let catalog = Catalog::new().with("ubuntu", &[("20.04", "2020-01-01")]);
        let result = run_audit(vec![entry("a", "Ubuntu", "20.04")], &catalog, now());
        let details = result.details(Path::new("inventory.csv"), None);

        let keys: Vec<_> = details.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "csv_file",
                "inventory_count",
                "evaluated_at",
                "eol_count",
                "eol_soon_count",
                "supported_count",
                "classification_counts",
                "entries",
                "html_report"
            ]
        );
        assert_eq!(details["classification_counts"]["end_of_life"], 1);
        assert_eq!(details["entries"][0]["product"], "ubuntu");
        assert_eq!(details["entries"][0]["severity"], "CRIT");
        assert_eq!(details["html_report"], Value::Null);
    }
}
