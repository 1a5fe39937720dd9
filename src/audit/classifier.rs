//! End-of-life classification of a single inventory entry.

use crate::catalog::FetchError;
use crate::model::{
    Classification, ClassifiedEntry, DateOrBool, InventoryEntry, LifecycleRecord, NOT_AVAILABLE,
};
use chrono::{NaiveDate, NaiveDateTime};

/// An EOL date closer than this many days is "EOL soon".
pub const EOL_SOON_HORIZON_DAYS: i64 = 180;

/// Classify one entry against the outcome of its catalog lookup.
///
/// Pure in (`now`, `lookup`): the same inputs always give the same result.
///
/// Policy:
/// 1. lookup failed → `ClassificationError`, error text kept
/// 2. first record whose `cycle` equals `entry.version` verbatim wins
/// 3. no such record → `VersionNotFound`
/// 4. no EOL announced (`eol` absent or `false`) → `Supported`, date `N/A`
/// 5. any other EOL value that is not a calendar date (`true`, free text)
///    → `Supported` with the raw value kept and a note in `error`; the
///    record is presumed alive
/// 6. otherwise compare calendar dates, see [`classify_eol_date`]
#[must_use]
pub fn classify(
    entry: InventoryEntry,
    lookup: Result<&[LifecycleRecord], &FetchError>,
    now: NaiveDateTime,
) -> ClassifiedEntry {
    let records = match lookup {
        Ok(records) => records,
        Err(e) => {
            return ClassifiedEntry {
                entry,
                classification: Classification::ClassificationError,
                eol_date: NOT_AVAILABLE.to_string(),
                error: Some(e.to_string()),
            };
        }
    };

    let Some(record) = records.iter().find(|r| r.cycle == entry.version) else {
        return ClassifiedEntry {
            entry,
            classification: Classification::VersionNotFound,
            eol_date: NOT_AVAILABLE.to_string(),
            error: None,
        };
    };

    let (classification, eol_date, error) = match &record.eol {
        None | Some(DateOrBool::Bool(false)) => {
            (Classification::Supported, NOT_AVAILABLE.to_string(), None)
        }
        Some(eol) => match eol.as_date() {
            Some(date) => (classify_eol_date(date, now.date()), eol.to_display(), None),
            None => {
                let raw = eol.to_display();
                tracing::warn!(
                    "{} {}: EOL value '{raw}' is not a date, treating as supported",
                    entry.os,
                    entry.version
                );
                let note = format!("EOL value '{raw}' is not a date");
                (Classification::Supported, raw, Some(note))
            }
        },
    };

    ClassifiedEntry {
        entry,
        classification,
        eol_date,
        error,
    }
}

/// Classify a known EOL date relative to `today`.
///
/// - `eol <= today` → `EndOfLife`
/// - fewer than [`EOL_SOON_HORIZON_DAYS`] days left → `EndOfLifeSoon`
/// - otherwise → `Supported`
#[must_use]
pub fn classify_eol_date(eol: NaiveDate, today: NaiveDate) -> Classification {
    if eol <= today {
        return Classification::EndOfLife;
    }
    if (eol - today).num_days() < EOL_SOON_HORIZON_DAYS {
        Classification::EndOfLifeSoon
    } else {
        Classification::Supported
    }
}
