//! Monthly KPI aggregate.

use std::collections::BTreeMap;

use ledgerstar_shared::{Table, Value};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::EtlError;

/// Columns of `KpiMonthly`.
pub const KPI_MONTHLY_COLUMNS: [&str; 5] =
    ["YearMonth", "Subsidiary", "Category", "Total_Amount", "Tx_Count"];

#[derive(Debug, Default)]
struct Bucket {
    total: Decimal,
    count: i64,
}

/// Aggregates the normalized financial table by month, subsidiary and category.
///
/// `Total_Amount` sums `Amount_Group_Currency`; `Tx_Count` counts rows with a
/// document number. Output is sorted by the grouping triple. Rows with a null
/// posting date, subsidiary or category are left out.
///
/// # Errors
///
/// Returns `EtlError::Overflow` if a group total exceeds the decimal range, or
/// `EtlError::Table` if a row cannot be assembled.
pub fn build_kpi_monthly(financial: &Table) -> Result<Table, EtlError> {
    let date_idx = financial.column_index("Posting_Date");
    let subsidiary_idx = financial.column_index("Subsidiary");
    let category_idx = financial.column_index("Category");
    let amount_idx = financial.column_index("Amount_Group_Currency");
    let document_idx = financial.column_index("Document_No");

    let mut groups: BTreeMap<(String, &Value, &Value), Bucket> = BTreeMap::new();
    let mut skipped = 0_usize;

    for row in financial.rows() {
        let subsidiary = row.at(subsidiary_idx);
        let category = row.at(category_idx);
        let Some(date) = row.at(date_idx).as_date() else {
            skipped += 1;
            continue;
        };
        if subsidiary.is_null() || category.is_null() {
            skipped += 1;
            continue;
        }

        let year_month = date.format("%Y-%m").to_string();
        let amount = row.at(amount_idx).as_decimal().unwrap_or_default();
        let bucket = groups
            .entry((year_month, subsidiary, category))
            .or_default();
        bucket.total = bucket
            .total
            .checked_add(amount)
            .ok_or_else(|| EtlError::Overflow {
                group: format!("{} {subsidiary} {category}", date.format("%Y-%m")),
            })?;
        if !row.at(document_idx).is_null() {
            bucket.count += 1;
        }
    }

    if skipped > 0 {
        debug!(skipped, "Rows without a grouping key left out of KpiMonthly");
    }

    let mut kpi = Table::new(KPI_MONTHLY_COLUMNS);
    for ((year_month, subsidiary, category), bucket) in groups {
        kpi.push_row(vec![
            Value::text(year_month),
            subsidiary.clone(),
            category.clone(),
            Value::Decimal(bucket.total),
            Value::Int(bucket.count),
        ])?;
    }

    info!(rows = kpi.len(), "KpiMonthly built");
    Ok(kpi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(date: Option<(u32, u32)>, subsidiary: &str, category: &str, amount: Decimal) -> Vec<Value> {
        vec![
            date.and_then(|(m, d)| NaiveDate::from_ymd_opt(2025, m, d)).into(),
            subsidiary.into(),
            category.into(),
            amount.into(),
            "TX".into(),
        ]
    }

    #[test]
    fn test_groups_sorted_and_summed() {
        let financial = Table::from_rows(
            ["Posting_Date", "Subsidiary", "Category", "Amount_Group_Currency", "Document_No"],
            vec![
                row(Some((2, 1)), "SBU_1", "Revenue", dec!(10.50)),
                row(Some((1, 9)), "SBU_2", "OPEX", dec!(-3)),
                row(Some((1, 3)), "SBU_2", "OPEX", dec!(-4.25)),
                row(Some((1, 3)), "SBU_1", "Revenue", dec!(1)),
                row(None, "SBU_1", "Revenue", dec!(100)),
            ],
        )
        .unwrap();

        let kpi = build_kpi_monthly(&financial).unwrap();
        assert_eq!(kpi.len(), 3);

        let months: Vec<_> = kpi.column_values("YearMonth").unwrap().cloned().collect();
        assert_eq!(
            months,
            vec![Value::text("2025-01"), Value::text("2025-01"), Value::text("2025-02")]
        );

        let opex = kpi.row(1).unwrap();
        assert_eq!(opex.get("Subsidiary"), &Value::text("SBU_2"));
        assert_eq!(opex.get("Total_Amount"), &Value::Decimal(dec!(-7.25)));
        assert_eq!(opex.get("Tx_Count"), &Value::Int(2));
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let financial = Table::from_rows(
            ["Posting_Date", "Subsidiary", "Category", "Amount_Group_Currency", "Document_No"],
            vec![
                row(Some((1, 3)), "SBU_1", "Revenue", huge),
                row(Some((1, 4)), "SBU_1", "Revenue", huge),
            ],
        )
        .unwrap();

        let err = build_kpi_monthly(&financial).unwrap_err();
        assert!(matches!(
            &err,
            EtlError::Overflow { group } if group == "2025-01 SBU_1 Revenue"
        ));
        assert_eq!(ledgerstar_shared::AppError::from(err).exit_code(), 65);
    }

    #[test]
    fn test_empty_input() {
        let kpi = build_kpi_monthly(&Table::new(["Posting_Date"])).unwrap();
        assert!(kpi.is_empty());
        assert_eq!(kpi.columns(), KPI_MONTHLY_COLUMNS);
    }
}
