//! CSV inventory parser.
//!
//! The inventory is a header-driven CSV: `os` and `version` are required,
//! `ip` and `hostname` are optional, and any other column is carried along
//! in [`InventoryEntry::extra`]. Cells past the last header column are kept
//! too, under `column_{n}` (1-based position). Cell values are kept verbatim
//! since the version is later compared to catalog cycles by exact string
//! equality.

use crate::error::InventoryErrorKind;
use crate::model::InventoryEntry;

const REQUIRED_COLUMNS: [&str; 2] = ["os", "version"];

/// One parsed CSV record and the line it starts on.
#[derive(Debug, PartialEq, Eq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Parse inventory CSV text into entries, in file order.
pub fn parse_inventory_str(content: &str) -> Result<Vec<InventoryEntry>, InventoryErrorKind> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content)?.into_iter();

    let header: Vec<String> = records
        .next()
        .ok_or(InventoryErrorKind::Empty)?
        .fields
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();

    let column = |name: &str| header.iter().position(|h| h.eq_ignore_ascii_case(name));
    for required in REQUIRED_COLUMNS {
        if column(required).is_none() {
            return Err(InventoryErrorKind::MissingColumn(required.to_string()));
        }
    }
    let known = ["ip", "hostname", "os", "version"].map(column);

    let mut entries = Vec::new();
    for record in records {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.fields.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let mut entry = InventoryEntry::new(
            cell(known[0]),
            cell(known[1]),
            cell(known[2]),
            cell(known[3]),
        );
        for (idx, name) in header.iter().enumerate() {
            if known.contains(&Some(idx)) {
                continue;
            }
            entry
                .extra
                .insert(name.clone(), record.fields.get(idx).cloned().unwrap_or_default());
        }
        if record.fields.len() > header.len() {
            tracing::warn!(
                "Inventory line {}: {} fields but the header has {}, keeping the surplus",
                record.line,
                record.fields.len(),
                header.len()
            );
            for (idx, value) in record.fields.iter().enumerate().skip(header.len()) {
                entry.extra.insert(format!("column_{}", idx + 1), value.clone());
            }
        }
        entries.push(entry);
    }

    Ok(entries)
}

/// Split CSV text into records.
///
/// Handles quoted fields (with `""` escapes and embedded newlines), CRLF
/// line endings, and skips blank lines.
fn split_records(content: &str) -> Result<Vec<Record>, InventoryErrorKind> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut has_content = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                has_content = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if has_content || !field.is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                has_content = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(InventoryErrorKind::MalformedRow {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if has_content || !field.is_empty() {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
