//! Writes the analytics model to `<output_dir>/model`.

use std::path::{Path, PathBuf};

use ledgerstar_core::etl::{EtlError, ModelSink, ModelTable};
use ledgerstar_shared::{OutputFormat, Table};
use tracing::debug;

use crate::columnar::write_parquet;
use crate::error::StorageError;

/// Name of the subdirectory receiving the model files.
pub const MODEL_DIR: &str = "model";

/// A `ModelSink` writing one file per table.
#[derive(Debug, Clone)]
pub struct ModelWriter {
    model_dir: PathBuf,
    format: OutputFormat,
}

impl ModelWriter {
    /// Creates `<output_dir>/model` if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn create(output_dir: &Path, format: OutputFormat) -> Result<Self, StorageError> {
        let model_dir = output_dir.join(MODEL_DIR);
        std::fs::create_dir_all(&model_dir).map_err(|err| StorageError::io(&model_dir, err))?;
        Ok(Self { model_dir, format })
    }

    /// Directory receiving the files.
    #[must_use]
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// File path of one table.
    #[must_use]
    pub fn path_for(&self, table: ModelTable) -> PathBuf {
        self.model_dir
            .join(format!("{}.{}", table.name(), self.format.extension()))
    }

    fn write(&self, path: &Path, data: &Table) -> Result<(), StorageError> {
        match self.format {
            OutputFormat::Csv => write_csv(path, data),
            OutputFormat::Parquet => write_parquet(path, data),
        }
    }
}

impl ModelSink for ModelWriter {
    fn location(&self) -> String {
        self.model_dir.display().to_string()
    }

    fn write_table(&mut self, table: ModelTable, data: &Table) -> Result<(), EtlError> {
        let path = self.path_for(table);
        self.write(&path, data).map_err(|err| EtlError::Sink {
            table: table.name().to_string(),
            message: err.to_string(),
        })?;
        debug!(path = %path.display(), "Model file written");
        Ok(())
    }
}

/// Writes a table as CSV with a header row; nulls are empty fields.
///
/// # Errors
///
/// Returns `StorageError::Csv` or `StorageError::Io` on write failure.
pub fn write_csv(path: &Path, data: &Table) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(data.columns())?;
    for row in data.rows() {
        writer.write_record(row.values().iter().map(ToString::to_string))?;
    }
    writer.flush().map_err(|err| StorageError::io(path, err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerstar_shared::Value;

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = ModelWriter::create(dir.path(), OutputFormat::Csv).unwrap();
        let second = ModelWriter::create(dir.path(), OutputFormat::Csv).unwrap();
        assert_eq!(first.model_dir(), second.model_dir());
        assert!(dir.path().join("model").is_dir());
    }

    #[test]
    fn test_csv_table_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = ModelWriter::create(dir.path(), OutputFormat::Csv).unwrap();
        let table = Table::from_rows(
            ["SubsidiaryKey", "Subsidiary"],
            vec![vec![Value::Int(1), "SBU_1".into()], vec![Value::Int(2), Value::Null]],
        )
        .unwrap();

        writer.write_table(ModelTable::DimSubsidiary, &table).unwrap();

        let path = dir.path().join("model").join("DimSubsidiary.csv");
        assert_eq!(writer.path_for(ModelTable::DimSubsidiary), path);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "SubsidiaryKey,Subsidiary\n1,SBU_1\n2,\n");
    }
}
