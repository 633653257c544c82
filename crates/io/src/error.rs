//! Storage error types.

use std::path::PathBuf;

use ledgerstar_shared::{AppError, TableError};
use thiserror::Error;

/// Errors raised while reading or writing files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row did not fit the table.
    #[error("Malformed row: {0}")]
    Table(#[from] TableError),

    /// A decimal does not fit its column at the column's scale.
    #[error("{column} value {value} does not fit Decimal128(38, {scale})")]
    DecimalRange {
        /// Column name.
        column: String,
        /// Offending value.
        value: rust_decimal::Decimal,
        /// Column scale.
        scale: u32,
    },

    /// Arrow array or schema failure.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet encoding failure.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => Self::NotFound(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}
