//! File layer for Ledgerstar.
//!
//! This crate provides:
//! - `CsvTableSource`, the file-backed `TableSource` of the pipeline
//! - `write_records` for the generator's CSV output
//! - `ModelWriter`, a `ModelSink` writing CSV or Parquet files

pub mod columnar;
pub mod csv_source;
pub mod error;
pub mod model_writer;
pub mod records;

pub use csv_source::CsvTableSource;
pub use error::StorageError;
pub use model_writer::ModelWriter;
pub use records::write_records;
