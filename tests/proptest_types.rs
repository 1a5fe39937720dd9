//! Property-based tests for severities and classification.
//!
//! Ensures the aggregate status and the date classification keep their
//! invariants across random inputs.

use chrono::{Duration, NaiveDate};
use ntl_systoolbox::audit::{classify, classify_eol_date, EOL_SOON_HORIZON_DAYS};
use ntl_systoolbox::model::{
    Classification, DateOrBool, InventoryEntry, LifecycleRecord, Severity,
};
use proptest::prelude::*;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Ok), Just(Severity::Warn), Just(Severity::Crit)]
}

fn today() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 .. roughly 2060
    (0i64..22_000).prop_map(|d| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(d))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn aggregate_is_worst_entry(severities in prop::collection::vec(severity(), 0..50)) {
        let status = Severity::aggregate(severities.iter().copied());
        prop_assert!(severities.iter().all(|s| *s <= status));
        if severities.is_empty() {
            prop_assert_eq!(status, Severity::Ok);
        } else {
            prop_assert!(severities.contains(&status));
        }
    }

    #[test]
    fn exit_code_matches_status(severities in prop::collection::vec(severity(), 0..20)) {
        let status = Severity::aggregate(severities);
        let expected = match status {
            Severity::Ok => 0,
            Severity::Warn => 1,
            Severity::Crit => 2,
        };
        prop_assert_eq!(status.exit_code(), expected);
    }

    #[test]
    fn eol_date_partition(today in today(), offset in -1000i64..1000) {
        let eol = today + Duration::days(offset);
        let classification = classify_eol_date(eol, today);
        let expected = if offset <= 0 {
            Classification::EndOfLife
        } else if offset < EOL_SOON_HORIZON_DAYS {
            Classification::EndOfLifeSoon
        } else {
            Classification::Supported
        };
        prop_assert_eq!(classification, expected);
    }

    #[test]
    fn classification_is_deterministic(
        today in today(),
        offset in -400i64..400,
        hour in 0u32..24,
    ) {
        let eol = (today + Duration::days(offset)).format("%Y-%m-%d").to_string();
        let records = vec![LifecycleRecord::new("1.0", Some(DateOrBool::Date(eol.clone())))];
        let entry = InventoryEntry::new("10.0.0.1", "h", "product", "1.0");
        let now = today.and_hms_opt(hour, 0, 0).unwrap();

        let first = classify(entry.clone(), Ok(records.as_slice()), now);
        let second = classify(entry, Ok(records.as_slice()), now);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.eol_date, eol);
        prop_assert!(first.error.is_none());
    }

    #[test]
    fn unknown_cycle_is_never_eol(
        version in "[0-9]{1,2}\\.[0-9]{1,2}",
        today in today(),
    ) {
        let records = vec![LifecycleRecord::new("catalog-only", Some(DateOrBool::Bool(true)))];
        let entry = InventoryEntry::new("10.0.0.1", "h", "product", version);
        let classified = classify(entry, Ok(records.as_slice()), today.and_hms_opt(0, 0, 0).unwrap());
        prop_assert_eq!(classified.classification, Classification::VersionNotFound);
        prop_assert_eq!(classified.severity(), Severity::Warn);
    }
}
