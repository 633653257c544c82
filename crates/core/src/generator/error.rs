//! Generator and dataset validation errors.

use ledgerstar_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised before any data is generated.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Row count must be positive.
    #[error("rows must be a positive integer, got {0}")]
    InvalidRowCount(usize),

    /// The posting window must span at least one day.
    #[error("posting window must span at least one day")]
    EmptyPostingWindow,

    /// Intercompany share is a percentage.
    #[error("intercompany percent must be between 0 and 100, got {0}")]
    InvalidIntercompanyPercent(u32),

    /// A reference catalog has nothing to draw from.
    #[error("catalog {0} is empty or has no positive weight")]
    EmptyCatalog(&'static str),

    /// The generated data failed its consistency checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Consistency violations in a generated dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The financial dataset has no rows.
    #[error("Financial dataset is empty.")]
    EmptyDataset,

    /// A document number occurs more than once.
    #[error("Duplicate Document_No values detected: {0}")]
    DuplicateDocument(String),

    /// Group amount does not equal the rounded converted amount.
    #[error("Amount_Group_Currency mismatch detected on {document}: expected {expected}, found {actual}")]
    AmountMismatch {
        /// Offending document.
        document: String,
        /// `round(Amount * FX_Rate, 2)`.
        expected: Decimal,
        /// Stored group amount.
        actual: Decimal,
    },

    /// Intercompany row without a target subsidiary.
    #[error("Intercompany row {0} is missing Intercompany_To.")]
    MissingIntercompanyTarget(String),

    /// Intercompany row targeting its own subsidiary.
    #[error("Intercompany row {0} targets its own subsidiary.")]
    SelfIntercompany(String),

    /// Audit row referencing a document that does not exist.
    #[error("Audit contains unknown Document_No value: {0}")]
    UnknownAuditDocument(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Validation(inner) => inner.into(),
            GeneratorError::EmptyCatalog(_) => Self::Internal(err.to_string()),
            other => Self::Config(other.to_string()),
        }
    }
}
