//! Property-based tests for dimension building.

use chrono::{Days, NaiveDate};
use ledgerstar_shared::{Table, Value};
use proptest::prelude::*;

use super::dimension::{SUBSIDIARY, build_dim_date, date_key};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Strategy for posting dates within three years, some of them null.
fn posting_dates() -> impl Strategy<Value = Vec<Option<u64>>> {
    prop::collection::vec(prop::option::weighted(0.9, 0u64..1_100), 1..60)
}

fn subsidiaries() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("SBU_[1-6]", 0..80)
}

proptest! {
    /// DimDate holds every day between the extremes exactly once.
    #[test]
    fn test_dim_date_coverage(offsets in posting_dates()) {
        let rows: Vec<Vec<Value>> = offsets
            .iter()
            .map(|o| vec![o.map(|d| base_date() + Days::new(d)).into()])
            .collect();
        let financial = Table::from_rows(["Posting_Date"], rows).unwrap();
        let dim = build_dim_date(&financial);

        let present: Vec<u64> = offsets.iter().flatten().copied().collect();
        match (present.iter().min(), present.iter().max()) {
            (Some(&lo), Some(&hi)) => {
                prop_assert_eq!(dim.len() as u64, hi - lo + 1);
                for (i, row) in dim.rows().enumerate() {
                    let day = base_date() + Days::new(lo + i as u64);
                    prop_assert_eq!(row.get("Date"), &Value::Date(day));
                    prop_assert_eq!(row.get("DateKey"), &Value::Int(date_key(day)));
                    prop_assert_eq!(
                        row.get("DateKey").to_string(),
                        day.format("%Y%m%d").to_string()
                    );
                }
            }
            _ => prop_assert!(dim.is_empty()),
        }
    }

    /// Building a dimension twice gives identical keys, one per distinct value.
    #[test]
    fn test_build_dimension_idempotent(names in subsidiaries()) {
        let rows: Vec<Vec<Value>> = names.iter().map(|n| vec![Value::text(n.as_str())]).collect();
        let source = Table::from_rows(["Subsidiary"], rows).unwrap();

        let first = SUBSIDIARY.build(&source).unwrap();
        let second = SUBSIDIARY.build(&source).unwrap();
        prop_assert_eq!(&first, &second);

        let distinct: std::collections::HashSet<&String> = names.iter().collect();
        prop_assert_eq!(first.len(), distinct.len());

        // Keys follow first appearance.
        let mut order: Vec<&String> = Vec::new();
        for name in &names {
            if !order.contains(&name) {
                order.push(name);
            }
        }
        for (i, row) in first.rows().enumerate() {
            prop_assert_eq!(row.get("SubsidiaryKey"), &Value::Int(i as i64 + 1));
            prop_assert_eq!(row.get("Subsidiary"), &Value::text(order[i].as_str()));
        }
    }
}
