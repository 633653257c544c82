//! Fact tables.

use std::collections::HashMap;

use ledgerstar_shared::{Table, Value};
use tracing::{info, warn};

use super::dimension::{DimensionIndex, DimensionSet, date_key};
use super::error::EtlError;

/// Columns of `FactFinancial`.
pub const FACT_FINANCIAL_COLUMNS: [&str; 13] = [
    "Document_No",
    "DateKey",
    "SubsidiaryKey",
    "DepartmentKey",
    "AccountKey",
    "Amount",
    "Amount_Group_Currency",
    "Approved",
    "Status",
    "Intercompany_Flag",
    "Currency",
    "FX_Rate",
    "Transaction_Type",
];

/// Columns of `FactAudit`.
pub const FACT_AUDIT_COLUMNS: [&str; 8] = [
    "Audit_ID",
    "Document_No",
    "DateKey",
    "SubsidiaryKey",
    "DepartmentKey",
    "Action_Type",
    "New_Amount",
    "Performed_On",
];

/// How fact rows without a dimension member are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Keep the row with a null key and log a warning.
    #[default]
    Permissive,
    /// Fail the run.
    Strict,
}

impl JoinPolicy {
    /// `Strict` when `strict` is set.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Permissive }
    }

    fn check(self, index: &DimensionIndex, unmatched: usize) -> Result<(), EtlError> {
        if unmatched == 0 {
            return Ok(());
        }
        let dimension = index.spec().table;
        match self {
            Self::Permissive => {
                warn!(dimension, unmatched, "Fact rows without a dimension member keep a null key");
                Ok(())
            }
            Self::Strict => Err(EtlError::UnmatchedDimension {
                dimension: dimension.to_string(),
                count: unmatched,
            }),
        }
    }
}

/// Builds `FactFinancial` from the normalized financial table.
///
/// Absent optional columns produce null cells.
///
/// # Errors
///
/// Returns `EtlError::UnmatchedDimension` under `JoinPolicy::Strict` when a
/// row has no member in one of the dimensions.
pub fn build_fact_financial(
    financial: &Table,
    dimensions: &DimensionSet,
    policy: JoinPolicy,
) -> Result<Table, EtlError> {
    let [account, department, subsidiary] = dimensions.indexes();
    let positions = |index: &DimensionIndex| -> Vec<Option<usize>> {
        index
            .spec()
            .natural_key
            .iter()
            .map(|c| financial.column_index(c))
            .collect()
    };
    let account_cols = positions(&account);
    let department_cols = positions(&department);
    let subsidiary_cols = positions(&subsidiary);

    let mut unmatched = [0_usize; 3];
    let mut fact = Table::new(FACT_FINANCIAL_COLUMNS);

    for row in financial.rows() {
        let mut key = |slot: usize, index: &DimensionIndex, cols: &[Option<usize>]| {
            let natural: Vec<Value> = cols.iter().map(|&c| row.at(c).clone()).collect();
            let found = index.lookup(&natural);
            if found.is_none() {
                unmatched[slot] += 1;
            }
            Value::from(found)
        };
        let account_key = key(0, &account, &account_cols[..]);
        let department_key = key(1, &department, &department_cols[..]);
        let subsidiary_key = key(2, &subsidiary, &subsidiary_cols[..]);

        fact.push_row(vec![
            row.get("Document_No").clone(),
            row.get("Posting_Date").as_date().map(date_key).into(),
            subsidiary_key,
            department_key,
            account_key,
            row.get("Amount").clone(),
            row.get("Amount_Group_Currency").clone(),
            row.get("Approved").clone(),
            row.get("Status").clone(),
            row.get("Intercompany_Flag").clone(),
            row.get("Currency").clone(),
            row.get("FX_Rate").clone(),
            row.get("Transaction_Type").clone(),
        ])?;
    }

    for (index, count) in [&account, &department, &subsidiary].into_iter().zip(unmatched) {
        policy.check(index, count)?;
    }

    info!(rows = fact.len(), "FactFinancial built");
    Ok(fact)
}

/// Builds `FactAudit`, enriching each audit row with the keys of its document.
///
/// When a document occurs with several key combinations the first one wins.
/// Audit rows for unknown documents get null keys.
///
/// # Errors
///
/// Returns `EtlError::Table` only if a row cannot be assembled.
pub fn build_fact_audit(audit: &Table, fact_financial: &Table) -> Result<Table, EtlError> {
    let mut lookup: HashMap<&Value, [&Value; 3]> = HashMap::with_capacity(fact_financial.len());
    for row in fact_financial.rows() {
        lookup.entry(row.get("Document_No")).or_insert([
            row.get("DateKey"),
            row.get("SubsidiaryKey"),
            row.get("DepartmentKey"),
        ]);
    }

    let null = Value::Null;
    let mut unknown = 0_usize;
    let mut fact = Table::new(FACT_AUDIT_COLUMNS);

    for row in audit.rows() {
        let document = row.get("Document_No");
        let [date, subsidiary, department] = lookup.get(document).copied().unwrap_or_else(|| {
            unknown += 1;
            [&null; 3]
        });

        fact.push_row(vec![
            row.get("Audit_ID").clone(),
            document.clone(),
            date.clone(),
            subsidiary.clone(),
            department.clone(),
            row.get("Action_Type").clone(),
            row.get("New_Amount").clone(),
            row.get("Performed_On").clone(),
        ])?;
    }

    if unknown > 0 {
        warn!(unknown, "Audit rows reference unknown documents");
    }
    info!(rows = fact.len(), "FactAudit built");
    Ok(fact)
}
