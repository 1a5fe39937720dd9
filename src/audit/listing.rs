//! Lifecycle listing for a single product.

use super::EOL_LIST_MODULE;
use crate::catalog::{FetchError, LifecycleClient};
use crate::model::{normalize_product, DateOrBool, LifecycleRecord, Severity};
use crate::reports::Report;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Every release cycle of one product, or why it could not be fetched.
#[derive(Debug, Clone)]
pub struct LifecycleListing {
    /// Product name as requested
    pub os_name: String,
    /// Catalog that was queried
    pub source: String,
    pub outcome: Result<Vec<LifecycleRecord>, FetchError>,
}

/// Fetch the lifecycle of `product` from `client`.
pub fn list_lifecycle<C>(product: &str, client: &C) -> LifecycleListing
where
    C: LifecycleClient + ?Sized,
{
    let product_id = normalize_product(product);
    tracing::debug!("Listing cycles of '{product_id}'");
    let outcome = client.fetch_lifecycle(&product_id);
    if let Err(e) = &outcome {
        tracing::warn!("Lookup failed for '{product_id}': {e}");
    }

    LifecycleListing {
        os_name: product.to_string(),
        source: client.source_name().to_string(),
        outcome,
    }
}

impl LifecycleListing {
    /// Cycles fetched, empty on failure.
    #[must_use]
    pub fn records(&self) -> &[LifecycleRecord] {
        self.outcome.as_deref().unwrap_or_default()
    }

    /// Transient failures (transport, HTTP status) are WARN; a payload the
    /// catalog should never send is CRIT.
    #[must_use]
    pub const fn status(&self) -> Severity {
        match &self.outcome {
            Ok(_) => Severity::Ok,
            Err(e) if e.is_transient() => Severity::Warn,
            Err(_) => Severity::Crit,
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        match &self.outcome {
            Ok(records) => format!("Récupéré {} versions de {}", records.len(), self.os_name),
            Err(e) if self.status() == Severity::Warn => {
                format!("Erreur API {}: {e}", self.source)
            }
            Err(e) => format!("Erreur inattendue: {e}"),
        }
    }

    /// Build the persisted report.
    #[must_use]
    pub fn to_report(&self, generated: NaiveDateTime) -> Report {
        let mut details = IndexMap::new();
        details.insert("os_name".to_string(), json!(self.os_name));
        details.insert("api_source".to_string(), json!(self.source));
        details.insert(
            "api_date".to_string(),
            json!(generated.date().format("%Y-%m-%d").to_string()),
        );

        let anomalies = match &self.outcome {
            Ok(records) => {
                details.insert("versions_count".to_string(), json!(records.len()));
                let versions: Vec<Value> = records.iter().map(version_details).collect();
                details.insert("versions".to_string(), Value::Array(versions));
                Vec::new()
            }
            Err(e) => {
                details.insert("error".to_string(), json!(e.to_string()));
                vec![e.to_string()]
            }
        };

        Report::at(
            generated,
            EOL_LIST_MODULE,
            self.status(),
            self.summary(),
            details,
            anomalies,
        )
    }
}

fn version_details(record: &LifecycleRecord) -> Value {
    json!({
        "cycle": record.cycle,
        "release_date": record.release_date,
        "eol_date": record.eol,
        "support": record.support,
        "lts": record.lts.clone().unwrap_or(DateOrBool::Bool(false)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct Fixed(Result<Vec<LifecycleRecord>, FetchError>);

    impl LifecycleClient for Fixed {
        fn fetch_lifecycle(&self, product_id: &str) -> Result<Vec<LifecycleRecord>, FetchError> {
            assert_eq!(product_id, "windows-server");
            self.0.clone()
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_listing_ok() {
        let mut record = LifecycleRecord::new("2019", Some(DateOrBool::Date("2029-01-09".into())));
        record.release_date = Some("2018-11-13".into());
        let client = Fixed(Ok(vec![record, LifecycleRecord::new("2022", None)]));

        let listing = list_lifecycle("Windows Server", &client);
        assert_eq!(listing.status(), Severity::Ok);
        assert_eq!(listing.records().len(), 2);

        let report = listing.to_report(now());
        assert_eq!(report.module, "audit_eol_list");
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.summary, "Récupéré 2 versions de Windows Server");
        assert_eq!(report.details["api_date"], "2024-05-02");
        assert_eq!(report.details["versions_count"], 2);
        assert_eq!(report.details["versions"][0]["eol_date"], "2029-01-09");
        assert_eq!(report.details["versions"][0]["release_date"], "2018-11-13");
        assert_eq!(report.details["versions"][1]["eol_date"], Value::Null);
        assert_eq!(report.details["versions"][1]["lts"], false);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_transport_failure_is_warn() {
        for err in [
            FetchError::Timeout,
            FetchError::Network("dns".into()),
            FetchError::Status {
                status: 404,
                product: "windows-server".into(),
            },
        ] {
            let listing = list_lifecycle("Windows Server", &Fixed(Err(err)));
            let report = listing.to_report(now());
            assert_eq!(report.status, Severity::Warn);
            assert_eq!(report.exit_code, 1);
            assert!(report.details.contains_key("error"));
            assert_eq!(report.anomalies.len(), 1);
            assert!(listing.records().is_empty());
        }
    }

    #[test]
    fn test_payload_failure_is_crit() {
        let listing = list_lifecycle("Windows Server", &Fixed(Err(FetchError::Payload("x".into()))));
        let report = listing.to_report(now());
        assert_eq!(report.status, Severity::Crit);
        assert!(report.summary.starts_with("Erreur inattendue"));
    }
}
