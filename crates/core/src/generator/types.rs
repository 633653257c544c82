//! Generated record types.
//!
//! Field renames carry the exact column names of the generated CSV files.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Account category of a general-ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Revenue accounts (positive amounts).
    Revenue,
    /// Cost of goods sold (negative amounts).
    #[serde(rename = "COGS")]
    Cogs,
    /// Operating expenses (negative amounts).
    #[serde(rename = "OPEX")]
    Opex,
}

impl Category {
    /// Label written to the `Category` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Cogs => "COGS",
            Self::Opex => "OPEX",
        }
    }
}

/// Posting status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionStatus {
    /// Not yet posted.
    Draft,
    /// Posted to the ledger.
    Posted,
    /// Reversed after posting.
    Reversed,
}

impl TransactionStatus {
    /// All statuses, in draw order.
    pub const ALL: [Self; 3] = [Self::Draft, Self::Posted, Self::Reversed];

    /// Label written to status columns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Posted => "Posted",
            Self::Reversed => "Reversed",
        }
    }
}

/// Direction of the expected cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CashflowType {
    /// Cash comes in (revenue).
    Inflow,
    /// Cash goes out (costs).
    Outflow,
}

impl CashflowType {
    /// Label written to the `Cashflow_Type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inflow => "Inflow",
            Self::Outflow => "Outflow",
        }
    }
}

/// How far past its due date a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgingBucket {
    /// Not overdue.
    Current,
    /// 1 to 30 days overdue.
    #[serde(rename = "1-30")]
    Days1To30,
    /// 31 to 60 days overdue.
    #[serde(rename = "31-60")]
    Days31To60,
    /// 61 to 90 days overdue.
    #[serde(rename = "61-90")]
    Days61To90,
    /// More than 90 days overdue.
    #[serde(rename = "90+")]
    Over90,
}

impl AgingBucket {
    /// Buckets a non-negative overdue day count.
    #[must_use]
    pub const fn from_days_overdue(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Current,
            1..=30 => Self::Days1To30,
            31..=60 => Self::Days31To60,
            61..=90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }

    /// Label written to the `Aging_Bucket` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Days1To30 => "1-30",
            Self::Days31To60 => "31-60",
            Self::Days61To90 => "61-90",
            Self::Over90 => "90+",
        }
    }
}

/// Kind of audit-journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuditAction {
    /// The document was entered.
    Created,
    /// A reviewer approved and posted the document.
    #[serde(rename = "Approved-Posted")]
    ApprovedPosted,
    /// The document was adjusted or reversed.
    #[serde(rename = "Adjusted-Reversed")]
    AdjustedReversed,
}

impl AuditAction {
    /// Label written to the `Action_Type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::ApprovedPosted => "Approved-Posted",
            Self::AdjustedReversed => "Adjusted-Reversed",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(Category, TransactionStatus, CashflowType, AgingBucket, AuditAction);

/// One general-ledger transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    /// Posting date.
    #[serde(rename = "Posting_Date")]
    pub posting_date: NaiveDate,
    /// Posting subsidiary.
    #[serde(rename = "Subsidiary")]
    pub subsidiary: String,
    /// Group company (constant).
    #[serde(rename = "Group_Company")]
    pub group_company: String,
    /// Department.
    #[serde(rename = "Department")]
    pub department: String,
    /// Cost center, derived from the department.
    #[serde(rename = "Cost_Center")]
    pub cost_center: String,
    /// Reporting segment.
    #[serde(rename = "Reporting_Segment")]
    pub reporting_segment: String,
    /// GL account number.
    #[serde(rename = "Account_No")]
    pub account_no: String,
    /// GL account name.
    #[serde(rename = "Account_Name")]
    pub account_name: String,
    /// Account category.
    #[serde(rename = "Category")]
    pub category: Category,
    /// IFRS / IAS standard governing the account.
    #[serde(rename = "IFRS_Standard")]
    pub ifrs_standard: String,
    /// Integer-valued amount in the transaction currency, signed by category.
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    /// Amount converted to the group currency, 2 decimals.
    #[serde(rename = "Amount_Group_Currency")]
    pub amount_group_currency: Decimal,
    /// Group currency code (constant).
    #[serde(rename = "Group_Currency")]
    pub group_currency: String,
    /// Unique document number, `TX-%06d`.
    #[serde(rename = "Document_No")]
    pub document_no: String,
    /// Customer, vendor, or intercompany partner.
    #[serde(rename = "Counterparty_ID")]
    pub counterparty_id: String,
    /// Transaction currency code.
    #[serde(rename = "Currency")]
    pub currency: String,
    /// FX rate to the group currency, 4 decimals.
    #[serde(rename = "FX_Rate")]
    pub fx_rate: Decimal,
    /// Transaction type.
    #[serde(rename = "Transaction_Type")]
    pub transaction_type: String,
    /// Bank account.
    #[serde(rename = "Bank_Account")]
    pub bank_account: String,
    /// User who entered the document.
    #[serde(rename = "Posted_By")]
    pub posted_by: String,
    /// Approval flag (0/1).
    #[serde(rename = "Approved")]
    pub approved: u8,
    /// Posting status.
    #[serde(rename = "Status")]
    pub status: TransactionStatus,
    /// Memo text.
    #[serde(rename = "Memo")]
    pub memo: String,
    /// Tax code.
    #[serde(rename = "Tax_Code")]
    pub tax_code: String,
    /// Intercompany flag (0/1).
    #[serde(rename = "Intercompany_Flag")]
    pub intercompany_flag: u8,
    /// Target subsidiary; empty unless intercompany.
    #[serde(rename = "Intercompany_To")]
    pub intercompany_to: String,
    /// Cash direction.
    #[serde(rename = "Cashflow_Type")]
    pub cashflow_type: CashflowType,
    /// Expected cash movement date.
    #[serde(rename = "Expected_Cashflow_Date")]
    pub expected_cashflow_date: NaiveDate,
    /// Payment terms in days.
    #[serde(rename = "Payment_Term_Days")]
    pub payment_term_days: u32,
    /// Due date.
    #[serde(rename = "Due_Date")]
    pub due_date: NaiveDate,
    /// Days past due at the as-of date, never negative.
    #[serde(rename = "Days_Overdue")]
    pub days_overdue: i64,
    /// Aging bucket of `days_overdue`.
    #[serde(rename = "Aging_Bucket")]
    pub aging_bucket: AgingBucket,
    /// Cost adjustment flag (0/1).
    #[serde(rename = "Cost_Adjustment_Flag")]
    pub cost_adjustment_flag: u8,
    /// Adjusted document; empty unless `cost_adjustment_flag == 1`.
    #[serde(rename = "Original_Doc_No")]
    pub original_doc_no: String,
}

impl FinancialRecord {
    /// Returns true for intercompany transactions.
    #[must_use]
    pub const fn is_intercompany(&self) -> bool {
        self.intercompany_flag == 1
    }
}

/// One audit-journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// Sequential id starting at 1.
    #[serde(rename = "Audit_ID")]
    pub audit_id: u64,
    /// Referenced transaction.
    #[serde(rename = "Document_No")]
    pub document_no: String,
    /// Action recorded.
    #[serde(rename = "Action_Type")]
    pub action_type: AuditAction,
    /// Acting user.
    #[serde(rename = "Performed_By")]
    pub performed_by: String,
    /// Action date.
    #[serde(rename = "Performed_On")]
    pub performed_on: NaiveDate,
    /// Amount before the action.
    #[serde(rename = "Previous_Amount")]
    pub previous_amount: Option<Decimal>,
    /// Amount after the action.
    #[serde(rename = "New_Amount")]
    pub new_amount: Option<Decimal>,
    /// Status before the action.
    #[serde(rename = "Previous_Status")]
    pub previous_status: Option<TransactionStatus>,
    /// Status after the action.
    #[serde(rename = "New_Status")]
    pub new_status: Option<TransactionStatus>,
    /// Memo text.
    #[serde(rename = "Memo")]
    pub memo: String,
    /// Cost center of the transaction.
    #[serde(rename = "Cost_Center")]
    pub cost_center: String,
    /// Subsidiary of the transaction.
    #[serde(rename = "Subsidiary")]
    pub subsidiary: String,
    /// Intercompany flag of the transaction.
    #[serde(rename = "Intercompany_Flag")]
    pub intercompany_flag: u8,
}
