//! Required input columns.

use std::collections::BTreeSet;

use ledgerstar_shared::Table;

use super::error::EtlError;

/// Columns the financial input must carry.
pub const REQUIRED_FINANCIAL_COLUMNS: [&str; 13] = [
    "Posting_Date",
    "Subsidiary",
    "Department",
    "Cost_Center",
    "Account_No",
    "Account_Name",
    "Category",
    "Amount",
    "Amount_Group_Currency",
    "Document_No",
    "Approved",
    "Status",
    "Intercompany_Flag",
];

/// Columns the audit input must carry.
pub const REQUIRED_AUDIT_COLUMNS: [&str; 5] = [
    "Audit_ID",
    "Document_No",
    "Action_Type",
    "Performed_On",
    "New_Amount",
];

/// Financial columns parsed as dates on load.
pub const FINANCIAL_DATE_COLUMNS: [&str; 3] =
    ["Posting_Date", "Expected_Cashflow_Date", "Due_Date"];

/// Audit columns parsed as dates on load.
pub const AUDIT_DATE_COLUMNS: [&str; 1] = ["Performed_On"];

/// Label used in financial schema errors.
pub const FINANCIAL_LABEL: &str = "Financial CSV";

/// Label used in audit schema errors.
pub const AUDIT_LABEL: &str = "Audit CSV";

/// Required columns absent from `table`, sorted and deduplicated.
#[must_use]
pub fn missing_columns(table: &Table, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| (*name).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Checks that `table` has every required column.
///
/// # Errors
///
/// Returns `EtlError::Schema` naming every missing column.
pub fn validate_columns(table: &Table, required: &[&str], label: &str) -> Result<(), EtlError> {
    let missing = missing_columns(table, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::Schema {
            label: label.to_string(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_sorted() {
        let table = Table::new(["Document_No", "Audit_ID"]);
        assert_eq!(
            missing_columns(&table, &REQUIRED_AUDIT_COLUMNS),
            vec!["Action_Type", "New_Amount", "Performed_On"]
        );
    }

    #[test]
    fn test_complete_table_passes() {
        let table = Table::new(REQUIRED_AUDIT_COLUMNS);
        assert!(validate_columns(&table, &REQUIRED_AUDIT_COLUMNS, AUDIT_LABEL).is_ok());
    }
}
