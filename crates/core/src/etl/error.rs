//! ETL error types.

use ledgerstar_shared::{AppError, TableError};
use thiserror::Error;

/// Errors that abort an ETL run.
#[derive(Debug, Error)]
pub enum EtlError {
    /// An input source does not exist.
    #[error("Input file not found: {0}")]
    NotFound(String),

    /// An input table lacks required columns.
    #[error("{label} is missing required columns: {missing:?}")]
    Schema {
        /// Which table was checked.
        label: String,
        /// Missing column names, sorted.
        missing: Vec<String>,
    },

    /// Fact rows without a matching dimension member under a strict join.
    #[error("{count} row(s) have no matching {dimension} member")]
    UnmatchedDimension {
        /// Dimension table name.
        dimension: String,
        /// Number of unmatched rows.
        count: usize,
    },

    /// Well-formed numbers that do not fit the column's numeric type.
    #[error("{count} value(s) in {column} are outside the supported numeric range")]
    OutOfRange {
        /// Column name.
        column: String,
        /// Number of offending cells.
        count: usize,
    },

    /// A KPI total does not fit a decimal.
    #[error("Total_Amount overflows for {group}")]
    Overflow {
        /// YearMonth, subsidiary and category of the group.
        group: String,
    },

    /// An input source exists but could not be read.
    #[error("Failed to read {origin}: {message}")]
    Source {
        /// Source description.
        origin: String,
        /// Underlying failure.
        message: String,
    },

    /// A model table could not be written.
    #[error("Failed to write {table}: {message}")]
    Sink {
        /// Model table name.
        table: String,
        /// Underlying failure.
        message: String,
    },

    /// Table construction failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<EtlError> for AppError {
    fn from(err: EtlError) -> Self {
        match err {
            EtlError::NotFound(_) => Self::NotFound(err.to_string()),
            EtlError::Schema { .. } => Self::Schema(err.to_string()),
            EtlError::UnmatchedDimension { .. }
            | EtlError::OutOfRange { .. }
            | EtlError::Overflow { .. } => Self::Validation(err.to_string()),
            EtlError::Source { .. } | EtlError::Sink { .. } => Self::Storage(err.to_string()),
            EtlError::Table(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_lists_columns() {
        let err = EtlError::Schema {
            label: "Financial CSV".into(),
            missing: vec!["Amount".into()],
        };
        assert_eq!(
            err.to_string(),
            r#"Financial CSV is missing required columns: ["Amount"]"#
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let not_found: AppError = EtlError::NotFound("a.csv".into()).into();
        assert_eq!(not_found.error_code(), "NOT_FOUND");

        let unmatched: AppError = EtlError::UnmatchedDimension {
            dimension: "DimAccount".into(),
            count: 2,
        }
        .into();
        assert_eq!(unmatched.exit_code(), 65);

        let sink: AppError = EtlError::Sink {
            table: "KpiMonthly".into(),
            message: "disk full".into(),
        }
        .into();
        assert_eq!(sink.error_code(), "STORAGE_ERROR");
    }
}
