//! Conversion of generated records into in-memory tables.
//!
//! Column names and order match the generated CSV files, so an in-memory
//! run and a file-based run see the same input.

use ledgerstar_shared::{Table, Value};

use super::types::{AuditRecord, FinancialRecord};

/// Columns of the financial table, in file order.
pub const FINANCIAL_COLUMNS: [&str; 34] = [
    "Posting_Date",
    "Subsidiary",
    "Group_Company",
    "Department",
    "Cost_Center",
    "Reporting_Segment",
    "Account_No",
    "Account_Name",
    "Category",
    "IFRS_Standard",
    "Amount",
    "Amount_Group_Currency",
    "Group_Currency",
    "Document_No",
    "Counterparty_ID",
    "Currency",
    "FX_Rate",
    "Transaction_Type",
    "Bank_Account",
    "Posted_By",
    "Approved",
    "Status",
    "Memo",
    "Tax_Code",
    "Intercompany_Flag",
    "Intercompany_To",
    "Cashflow_Type",
    "Expected_Cashflow_Date",
    "Payment_Term_Days",
    "Due_Date",
    "Days_Overdue",
    "Aging_Bucket",
    "Cost_Adjustment_Flag",
    "Original_Doc_No",
];

/// Columns of the audit table, in file order.
pub const AUDIT_COLUMNS: [&str; 13] = [
    "Audit_ID",
    "Document_No",
    "Action_Type",
    "Performed_By",
    "Performed_On",
    "Previous_Amount",
    "New_Amount",
    "Previous_Status",
    "New_Status",
    "Memo",
    "Cost_Center",
    "Subsidiary",
    "Intercompany_Flag",
];

/// Empty text reads back from CSV as a missing cell.
fn text_or_null(value: &str) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::text(value)
    }
}

impl FinancialRecord {
    fn to_row(&self) -> [Value; FINANCIAL_COLUMNS.len()] {
        [
            self.posting_date.into(),
            self.subsidiary.as_str().into(),
            self.group_company.as_str().into(),
            self.department.as_str().into(),
            self.cost_center.as_str().into(),
            self.reporting_segment.as_str().into(),
            self.account_no.as_str().into(),
            self.account_name.as_str().into(),
            self.category.as_str().into(),
            self.ifrs_standard.as_str().into(),
            self.amount.into(),
            self.amount_group_currency.into(),
            self.group_currency.as_str().into(),
            self.document_no.as_str().into(),
            self.counterparty_id.as_str().into(),
            self.currency.as_str().into(),
            self.fx_rate.into(),
            self.transaction_type.as_str().into(),
            self.bank_account.as_str().into(),
            self.posted_by.as_str().into(),
            i64::from(self.approved).into(),
            self.status.as_str().into(),
            self.memo.as_str().into(),
            self.tax_code.as_str().into(),
            i64::from(self.intercompany_flag).into(),
            text_or_null(&self.intercompany_to),
            self.cashflow_type.as_str().into(),
            self.expected_cashflow_date.into(),
            i64::from(self.payment_term_days).into(),
            self.due_date.into(),
            self.days_overdue.into(),
            self.aging_bucket.as_str().into(),
            i64::from(self.cost_adjustment_flag).into(),
            text_or_null(&self.original_doc_no),
        ]
    }
}

impl AuditRecord {
    fn to_row(&self) -> [Value; AUDIT_COLUMNS.len()] {
        [
            i64::try_from(self.audit_id).map_or(Value::Null, Value::Int),
            self.document_no.as_str().into(),
            self.action_type.as_str().into(),
            self.performed_by.as_str().into(),
            self.performed_on.into(),
            self.previous_amount.into(),
            self.new_amount.into(),
            self.previous_status.map(|s| s.as_str()).into(),
            self.new_status.map(|s| s.as_str()).into(),
            self.memo.as_str().into(),
            self.cost_center.as_str().into(),
            self.subsidiary.as_str().into(),
            i64::from(self.intercompany_flag).into(),
        ]
    }
}

/// Builds the financial table from generated records.
#[must_use]
pub fn financial_table(records: &[FinancialRecord]) -> Table {
    Table::from_arrays(FINANCIAL_COLUMNS, records.iter().map(FinancialRecord::to_row))
}

/// Builds the audit table from generated records.
#[must_use]
pub fn audit_table(records: &[AuditRecord]) -> Table {
    Table::from_arrays(AUDIT_COLUMNS, records.iter().map(AuditRecord::to_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::service::{DatasetGenerator, GeneratorParams};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_tables_have_one_row_per_record() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = GeneratorParams {
            rows: 50,
            ..GeneratorParams::default()
        };
        let dataset = DatasetGenerator::generate(&mut rng, &params).unwrap();

        let financial = financial_table(&dataset.financial);
        let audit = audit_table(&dataset.audit);

        assert_eq!(financial.len(), 50);
        assert_eq!(financial.columns().len(), FINANCIAL_COLUMNS.len());
        assert_eq!(audit.len(), dataset.audit.len());

        let first = financial.row(0).unwrap();
        assert_eq!(first.get("Document_No"), &Value::text("TX-000001"));
        assert_eq!(
            first.get("Amount_Group_Currency"),
            &Value::Decimal(dataset.financial[0].amount_group_currency)
        );
    }

    #[test]
    fn test_created_entry_has_null_previous_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = GeneratorParams {
            rows: 5,
            ..GeneratorParams::default()
        };
        let dataset = DatasetGenerator::generate(&mut rng, &params).unwrap();
        let audit = audit_table(&dataset.audit);
        let created = audit.row(0).unwrap();
        assert_eq!(created.get("Action_Type"), &Value::text("Created"));
        assert!(created.get("Previous_Amount").is_null());
        assert!(created.get("Previous_Status").is_null());
    }
}
