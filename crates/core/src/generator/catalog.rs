//! Reference data the generator draws from.

use super::types::Category;

/// Group company written on every row.
pub const GROUP_COMPANY: &str = "Group_Company";

/// Departments with their cost centers.
pub const DEPARTMENTS: [(&str, &str); 11] = [
    ("Financial Management", "CC_Finance"),
    ("Sales and Marketing", "CC_Sales"),
    ("Purchasing", "CC_Purchasing"),
    ("Warehouse", "CC_Warehouse"),
    ("Manufacturing", "CC_Manufacturing"),
    ("Jobs", "CC_Jobs"),
    ("Resource Planning", "CC_ResourcePlanning"),
    ("Service", "CC_Service"),
    ("Human Resources", "CC_HR"),
    ("Administrative", "CC_Admin"),
    ("Fleet Management", "CC_Fleet"),
];

/// Subsidiaries (strategic business units).
pub const SUBSIDIARIES: [&str; 5] = [
    "SBU_1_Manufacturing",
    "SBU_2_SalesMarketing",
    "SBU_3_Service",
    "SBU_4_FleetLogistics",
    "SBU_5_JobsResource",
];

/// A chart-of-accounts entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlAccount {
    /// Account number.
    pub number: &'static str,
    /// Account category.
    pub category: Category,
    /// Account name.
    pub name: &'static str,
    /// Governing IFRS / IAS standard.
    pub ifrs_standard: &'static str,
}

const fn account(
    number: &'static str,
    category: Category,
    name: &'static str,
    ifrs_standard: &'static str,
) -> GlAccount {
    GlAccount {
        number,
        category,
        name,
        ifrs_standard,
    }
}

/// Chart of accounts.
pub const GL_ACCOUNTS: [GlAccount; 10] = [
    account("4000", Category::Revenue, "Sales Revenue", "IFRS 15"),
    account("4010", Category::Revenue, "Service Revenue", "IFRS 15"),
    account("5000", Category::Cogs, "Cost of Goods Sold", "IAS 2"),
    account("5100", Category::Cogs, "Direct Materials", "IAS 2"),
    account("6000", Category::Opex, "Operating Expenses", "IAS 1"),
    account("6100", Category::Opex, "Marketing Expenses", "IAS 1"),
    account("6200", Category::Opex, "Salaries & Wages", "IAS 19"),
    account("6300", Category::Opex, "Fleet Expenses", "IAS 16"),
    account("6400", Category::Opex, "Administrative Expenses", "IAS 1"),
    account("6500", Category::Opex, "Training & HR Expenses", "IAS 19"),
];

/// Transaction currencies.
pub const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "NGN"];

/// Transaction types.
pub const TRANSACTION_TYPES: [&str; 8] = [
    "Sales Invoice",
    "Purchase Invoice",
    "Payment",
    "Receipt",
    "Journal Entry",
    "Cash Advance",
    "Employee Reimbursement",
    "Retirement Settlement",
];

/// Memo texts with draw weights (percent).
pub const MEMOS: [(&str, u32); 7] = [
    ("Monthly sale", 30),
    ("Purchase order", 20),
    ("Salary payment", 20),
    ("Fleet maintenance", 10),
    ("Cash advance issued", 5),
    ("Employee reimbursement", 10),
    ("Retirement settlement", 5),
];

/// Tax codes.
pub const TAX_CODES: [&str; 3] = ["VAT_0", "VAT_5", "VAT_10"];

/// Reporting segments.
pub const REPORTING_SEGMENTS: [&str; 4] =
    ["Industrial", "Commercial", "Corporate Services", "Logistics"];

/// Bank accounts.
pub const BANK_ACCOUNTS: [&str; 4] = [
    "BANK_USD_MAIN",
    "BANK_EUR_MAIN",
    "BANK_GBP_MAIN",
    "BANK_NGN_OPS",
];

/// Payment terms in days with draw weights (percent).
pub const PAYMENT_TERMS: [(u32, u32); 6] = [(0, 5), (7, 10), (14, 15), (30, 40), (45, 20), (60, 10)];

/// Number of distinct vendors (`VENDOR_001`..).
pub const VENDOR_COUNT: u32 = 150;

/// Number of distinct customers (`CUSTOMER_001`..).
pub const CUSTOMER_COUNT: u32 = 200;

/// Number of distinct users (`User_1`..).
pub const USER_COUNT: u32 = 20;

/// Intercompany (from, to) pairs. Every pair crosses subsidiaries.
pub const INTERCOMPANY_PAIRS: [(&str, &str); 5] = [
    ("SBU_1_Manufacturing", "SBU_2_SalesMarketing"),
    ("SBU_2_SalesMarketing", "SBU_3_Service"),
    ("SBU_3_Service", "SBU_4_FleetLogistics"),
    ("SBU_4_FleetLogistics", "SBU_5_JobsResource"),
    ("SBU_5_JobsResource", "SBU_1_Manufacturing"),
];
