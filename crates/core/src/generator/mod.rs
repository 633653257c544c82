//! Synthetic ledger generation.
//!
//! This module produces the raw inputs of the analytics pipeline:
//! - Financial transactions across subsidiaries, departments and accounts
//! - Intercompany transactions between subsidiary pairs
//! - An audit journal derived from each transaction's lifecycle
//! - Consistency checks run before anything is written

pub mod catalog;
pub mod error;
pub mod service;
pub mod table;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::{GeneratorError, ValidationError};
pub use service::{DatasetGenerator, GeneratedDataset, GeneratorParams, document_number};
pub use table::{AUDIT_COLUMNS, FINANCIAL_COLUMNS, audit_table, financial_table};
pub use types::{
    AgingBucket, AuditAction, AuditRecord, CashflowType, Category, FinancialRecord,
    TransactionStatus,
};
pub use validation::validate_dataset;
