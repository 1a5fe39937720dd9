//! HTML inventory report generator.

use super::escape::{escape_html, escape_html_cell};
use super::{report_file_name, write_report_file, ReportError, ReportFormat};
use crate::audit::AuditResult;
use crate::model::{Classification, ClassifiedEntry, ReportGroup};
use chrono::NaiveDateTime;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// File name prefix of the inventory HTML report.
pub const HTML_REPORT_PREFIX: &str = "audit_eol_inventory";

/// HTML report generator
///
/// Produces one self-contained document: styles are inlined and no external
/// asset is referenced. The three sections are always rendered, empty or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    const fn get_styles(&self) -> &'static str {
        r#"
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif;
            margin: 20px;
            color: #333;
            line-height: 1.5;
        }
        h1 { color: #333; }
        h2 { margin-top: 30px; }
        table { border-collapse: collapse; width: 100%; margin-bottom: 30px; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
        .eol { background-color: #ffcccc; }
        .eol-soon { background-color: #fff4cc; }
        .supported { background-color: #ccffcc; }
        .not-found { background-color: #eeeeee; }
        .lookup-error { background-color: #ffe0b3; }
        .empty { color: #888; font-style: italic; text-align: center; }
        .footer { margin-top: 30px; font-size: 12px; color: #666; }
    </style>
"#
    }

    /// Render the inventory document.
    pub fn generate(
        &self,
        result: &AuditResult,
        generated: NaiveDateTime,
    ) -> Result<String, ReportError> {
        let mut html = String::new();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"fr\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <title>Rapport Audit EOL - {}</title>",
            generated.format("%Y-%m-%d %H:%M")
        )?;
        write!(html, "{}", self.get_styles())?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;

        writeln!(html, "    <h1>Rapport Audit d'Obsolescence</h1>")?;
        writeln!(
            html,
            "    <p><strong>Date:</strong> {}</p>",
            generated.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(html, "    <p><strong>Source:</strong> endoflife.date API</p>")?;
        writeln!(
            html,
            "    <p><strong>Inventaire:</strong> {} serveurs analysés</p>",
            result.entries.len()
        )?;
        writeln!(
            html,
            "    <p><strong>Statut:</strong> {}</p>",
            escape_html(result.status.as_str())
        )?;

        for (group, title) in [
            (ReportGroup::EndOfLife, "Serveurs en fin de vie (EOL)"),
            (ReportGroup::EndOfLifeSoon, "Serveurs bientôt EOL (&lt;6 mois)"),
            (ReportGroup::Other, "Serveurs supportés et autres"),
        ] {
            self.write_section(&mut html, result, group, title)?;
        }

        writeln!(html, "    <div class=\"footer\">")?;
        writeln!(
            html,
            "        <p><strong>NTL-SysToolbox v{}</strong> - NordTransit Logistics DSI</p>",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            html,
            "        <p>Source: <a href=\"https://endoflife.date\">endoflife.date</a> - Données communautaires</p>"
        )?;
        writeln!(html, "    </div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn write_section(
        &self,
        html: &mut String,
        result: &AuditResult,
        group: ReportGroup,
        title: &str,
    ) -> Result<(), ReportError> {
        let rows: Vec<&ClassifiedEntry> = result.group(group).collect();

        writeln!(html, "    <h2>{title} - {}</h2>", rows.len())?;
        writeln!(html, "    <table class=\"{}\">", section_id(group))?;
        writeln!(html, "        <thead>")?;
        writeln!(
            html,
            "            <tr><th>IP</th><th>Hostname</th><th>OS</th><th>Version</th><th>Date EOL</th></tr>"
        )?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;

        if rows.is_empty() {
            writeln!(
                html,
                "            <tr><td colspan=\"5\" class=\"empty\">Aucun serveur</td></tr>"
            )?;
        }
        for row in rows {
            let title = match &row.error {
                Some(error) => format!("{}: {error}", row.classification.label()),
                None => row.classification.label().to_string(),
            };
            writeln!(
                html,
                "            <tr class=\"{}\" title=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row_class(row.classification),
                escape_html(&title),
                escape_html_cell(&row.entry.ip),
                escape_html_cell(&row.entry.hostname),
                escape_html_cell(&row.entry.os),
                escape_html_cell(&row.entry.version),
                escape_html_cell(&row.eol_date),
            )?;
        }

        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        Ok(())
    }

    /// Write `audit_eol_inventory_{YYYYMMDD_HHMMSS}.html` into `output_dir`,
    /// stamped with the write time `at`.
    pub fn write_at(
        &self,
        result: &AuditResult,
        output_dir: &Path,
        at: NaiveDateTime,
    ) -> Result<PathBuf, ReportError> {
        let content = self.generate(result, at)?;
        let name = report_file_name(HTML_REPORT_PREFIX, ReportFormat::Html, at);
        write_report_file(output_dir, &name, &content)
    }
}

const fn section_id(group: ReportGroup) -> &'static str {
    match group {
        ReportGroup::EndOfLife => "section-eol",
        ReportGroup::EndOfLifeSoon => "section-eol-soon",
        ReportGroup::Other => "section-other",
    }
}

const fn row_class(classification: Classification) -> &'static str {
    match classification {
        Classification::EndOfLife => "eol",
        Classification::EndOfLifeSoon => "eol-soon",
        Classification::Supported => "supported",
        Classification::VersionNotFound => "not-found",
        Classification::ClassificationError => "lookup-error",
    }
}
