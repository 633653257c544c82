//! Headered CSV files as pipeline sources.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use ledgerstar_core::etl::extract::parse_date_columns;
use ledgerstar_core::etl::{EtlError, TableSource};
use ledgerstar_shared::{Table, Value};
use tracing::debug;

use crate::error::StorageError;

/// A CSV file with a header row.
///
/// Every cell is read as text; empty cells become `Null`.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
}

impl CsvTableSource {
    /// Creates a source for `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file into a table.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for a missing file or
    /// `StorageError::Csv` for unreadable content.
    pub fn read(&self) -> Result<Table, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound(self.path.clone()));
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&self.path)?;
        let mut table = Table::new(reader.headers()?.iter());

        for record in reader.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| if cell.is_empty() { Value::Null } else { Value::text(cell) })
                .collect();
            table.push_row(row)?;
        }

        debug!(path = %self.path.display(), rows = table.len(), "CSV read");
        Ok(table)
    }
}

impl TableSource for CsvTableSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self, date_columns: &[&str]) -> Result<Table, EtlError> {
        let mut table = self.read().map_err(|err| match err {
            StorageError::NotFound(path) => EtlError::NotFound(path.display().to_string()),
            other => EtlError::Source {
                origin: self.describe(),
                message: other.to_string(),
            },
        })?;
        parse_date_columns(&mut table, date_columns);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_reads_cells_and_dates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Performed_On,Document_No,Previous_Amount").unwrap();
        writeln!(file, "2025-01-05,TX-000001,").unwrap();
        writeln!(file, "2025-01-06 08:00:00,TX-000002,15.5").unwrap();

        let table = CsvTableSource::new(file.path()).load(&["Performed_On"]).unwrap();
        assert_eq!(table.len(), 2);

        let first = table.row(0).unwrap();
        assert_eq!(
            first.get("Performed_On"),
            &Value::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
        );
        assert!(first.get("Previous_Amount").is_null());
        assert_eq!(table.row(1).unwrap().get("Previous_Amount"), &Value::text("15.5"));
    }

    #[test]
    fn test_missing_file() {
        let source = CsvTableSource::new("/definitely/not/here.csv");
        assert!(matches!(source.load(&[]), Err(EtlError::NotFound(_))));
    }

    #[test]
    fn test_ragged_row_is_a_source_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A,B").unwrap();
        writeln!(file, "1,2,3").unwrap();

        let err = CsvTableSource::new(file.path()).load(&[]).unwrap_err();
        assert!(matches!(err, EtlError::Source { .. }));
    }
}
