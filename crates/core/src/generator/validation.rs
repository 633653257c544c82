//! Consistency checks run on a generated dataset before it is written.

use std::collections::HashSet;

use super::error::ValidationError;
use super::types::{AuditRecord, FinancialRecord};
use crate::currency::to_group_currency;

/// Validates a financial table and its audit journal.
///
/// Checks, in order: non-empty, unique document numbers, group amounts
/// equal to the rounded converted amount, intercompany rows with a distinct
/// target, and audit rows referencing known documents.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_dataset(
    financial: &[FinancialRecord],
    audit: &[AuditRecord],
) -> Result<(), ValidationError> {
    if financial.is_empty() {
        return Err(ValidationError::EmptyDataset);
    }

    let mut documents = HashSet::with_capacity(financial.len());
    for tx in financial {
        if !documents.insert(tx.document_no.as_str()) {
            return Err(ValidationError::DuplicateDocument(tx.document_no.clone()));
        }
    }

    for tx in financial {
        let expected = to_group_currency(tx.amount, tx.fx_rate);
        if expected != tx.amount_group_currency {
            return Err(ValidationError::AmountMismatch {
                document: tx.document_no.clone(),
                expected,
                actual: tx.amount_group_currency,
            });
        }
    }

    for tx in financial.iter().filter(|tx| tx.is_intercompany()) {
        if tx.intercompany_to.is_empty() {
            return Err(ValidationError::MissingIntercompanyTarget(
                tx.document_no.clone(),
            ));
        }
        if tx.intercompany_to == tx.subsidiary {
            return Err(ValidationError::SelfIntercompany(tx.document_no.clone()));
        }
    }

    if let Some(unknown) = audit
        .iter()
        .find(|entry| !documents.contains(entry.document_no.as_str()))
    {
        return Err(ValidationError::UnknownAuditDocument(
            unknown.document_no.clone(),
        ));
    }

    Ok(())
}
