//! Audit command handlers.
//!
//! Implements `audit inventory` and `audit eol-list`. Each run prints the
//! console block first, then persists its reports, so the outcome is never
//! lost when the report directory is unusable.

use crate::audit::{list_lifecycle, run_audit_with, INVENTORY_MODULE};
use crate::catalog::{EndOfLifeClient, LifecycleClient};
use crate::config::AppConfig;
use crate::model::Severity;
use crate::parsers::parse_inventory;
use crate::reports::{
    report_file_name, HtmlReporter, JsonReporter, Report, ReportError, ReportFormat,
    SummaryReporter, HTML_REPORT_PREFIX,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Cycles shown on the console by `audit eol-list`.
const LISTED_CYCLES: usize = 10;

/// What a run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// The report as built in memory
    pub report: Report,
    /// JSON report path, if written
    pub json_path: Option<PathBuf>,
    /// HTML report path, if written
    pub html_path: Option<PathBuf>,
    /// Process exit code; CRIT when persistence failed
    pub exit_code: i32,
}

/// Run the inventory audit against the configured catalog.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_inventory_audit(csv_file: &Path, config: &AppConfig) -> Result<i32> {
    let client = build_client(config)?;
    let outcome = run_inventory_audit_with(csv_file, config, &client, local_now);
    Ok(outcome.exit_code)
}

/// Run the inventory audit with an explicit client and clock.
///
/// `clock` is read once before classification and once more when the
/// reports are generated; the second reading stamps the report and both
/// file names.
pub fn run_inventory_audit_with<C, K>(
    csv_file: &Path,
    config: &AppConfig,
    client: &C,
    clock: K,
) -> RunOutcome
where
    C: LifecycleClient + ?Sized,
    K: Fn() -> NaiveDateTime,
{
    let reports_dir = config.reports.path.as_path();

    let inventory = match parse_inventory(csv_file) {
        Ok(inventory) => inventory,
        Err(e) => {
            tracing::error!("Cannot read inventory: {e}");
            let generated = clock();
            let mut details = IndexMap::new();
            details.insert("csv_file".to_string(), json!(csv_file.display().to_string()));
            details.insert("error".to_string(), json!(e.to_string()));
            let report = Report::at(
                generated,
                INVENTORY_MODULE,
                Severity::Crit,
                format!("Erreur lecture CSV: {e}"),
                details,
                vec![e.to_string()],
            );
            print_block(&report, config);
            let json_path =
                persist(|| JsonReporter::new().write_at(&report, reports_dir, generated));
            return RunOutcome {
                exit_code: Severity::Crit.exit_code(),
                report,
                json_path,
                html_path: None,
            };
        }
    };

    let result = run_audit_with(inventory, client, clock(), config.audit_options());

    let generated = clock();
    let html_target = reports_dir.join(report_file_name(
        HTML_REPORT_PREFIX,
        ReportFormat::Html,
        generated,
    ));
    let report = Report::at(
        generated,
        INVENTORY_MODULE,
        result.status,
        result.summary(),
        result.details(csv_file, Some(html_target.as_path())),
        result.anomalies.clone(),
    );
    print_block(&report, config);

    // The JSON report points at the HTML one, so it is only written once the
    // HTML document exists.
    let html_path = persist(|| HtmlReporter::new().write_at(&result, reports_dir, generated));
    let json_path = html_path
        .as_ref()
        .and_then(|_| persist(|| JsonReporter::new().write_at(&report, reports_dir, generated)));

    let exit_code = if json_path.is_some() {
        report.exit_code
    } else {
        Severity::Crit.exit_code()
    };
    RunOutcome {
        report,
        json_path,
        html_path,
        exit_code,
    }
}

/// List every cycle of one product from the configured catalog.
pub fn run_eol_list(product: &str, config: &AppConfig) -> Result<i32> {
    let client = build_client(config)?;
    let outcome = run_eol_list_with(product, config, &client, local_now);
    Ok(outcome.exit_code)
}

/// List every cycle of one product with an explicit client and clock.
pub fn run_eol_list_with<C, K>(
    product: &str,
    config: &AppConfig,
    client: &C,
    clock: K,
) -> RunOutcome
where
    C: LifecycleClient + ?Sized,
    K: Fn() -> NaiveDateTime,
{
    let listing = list_lifecycle(product, client);

    if !listing.records().is_empty() {
        println!("\nVersions de {product} (source: {}):", listing.source);
        for record in listing.records().iter().take(LISTED_CYCLES) {
            let eol = record
                .eol
                .as_ref()
                .map_or_else(|| "-".to_string(), |e| e.to_display());
            println!("  - {}: EOL {eol}", record.cycle);
        }
    }

    let generated = clock();
    let report = listing.to_report(generated);
    print_block(&report, config);

    let json_path =
        persist(|| JsonReporter::new().write_at(&report, config.reports.path.as_path(), generated));
    let exit_code = if json_path.is_some() {
        report.exit_code
    } else {
        Severity::Crit.exit_code()
    };
    RunOutcome {
        report,
        json_path,
        html_path: None,
        exit_code,
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn build_client(config: &AppConfig) -> Result<EndOfLifeClient> {
    EndOfLifeClient::new(config.catalog_client_config())
        .context("failed to initialize the lifecycle catalog client")
}

fn print_block(report: &Report, config: &AppConfig) {
    let reporter = if config.output.no_color || std::env::var_os("NO_COLOR").is_some() {
        SummaryReporter::new().no_color()
    } else {
        SummaryReporter::new()
    };
    print!("{}", reporter.generate(report));
}

/// Run one write, logging the failure instead of propagating it.
fn persist<F>(write: F) -> Option<PathBuf>
where
    F: FnOnce() -> Result<PathBuf, ReportError>,
{
    match write() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::error!("Report not saved: {e}");
            eprintln!("Error: report not saved: {e}");
            None
        }
    }
}
