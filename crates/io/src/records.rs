//! Serializing typed records to CSV.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::StorageError;

/// Writes `records` to `path` with a header row taken from their field names.
///
/// Parent directories are created. Returns the number of rows written.
///
/// # Errors
///
/// Returns `StorageError::Io` if the directory cannot be created or
/// `StorageError::Csv` if a record cannot be written.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<usize, StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .map_err(|err| StorageError::io(path, err))?;

    info!(path = %path.display(), rows = records.len(), "CSV written");
    Ok(records.len())
}
