//! Arrow record batches and Parquet files from in-memory tables.
//!
//! Column types are inferred from the non-null cells: integers become
//! `Int64`, decimals `Decimal128` at the widest scale seen, dates `Date32`,
//! everything else `Utf8`.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Decimal128Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use ledgerstar_shared::{Table, Value};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;

use crate::error::StorageError;

const DECIMAL_PRECISION: u8 = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Decimal { scale: u32 },
    Date,
    Text,
}

impl ColumnType {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int(_) => Some(Self::Int),
            Value::Decimal(d) => Some(Self::Decimal { scale: d.scale() }),
            Value::Date(_) => Some(Self::Date),
            Value::Text(_) => Some(Self::Text),
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int, Self::Int) => Self::Int,
            (Self::Decimal { scale: a }, Self::Decimal { scale: b }) => Self::Decimal { scale: a.max(b) },
            (Self::Decimal { scale }, Self::Int) | (Self::Int, Self::Decimal { scale }) => {
                Self::Decimal { scale }
            }
            (Self::Date, Self::Date) => Self::Date,
            _ => Self::Text,
        }
    }

    fn infer<'a>(values: impl Iterator<Item = &'a Value>) -> Self {
        values
            .filter_map(Self::of)
            .reduce(Self::merge)
            .unwrap_or(Self::Text)
    }
}

fn epoch_days(date: NaiveDate) -> Option<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from((date - epoch).num_days()).ok()
}

/// Mantissa of `value` at `scale`, exact or `None` past 38 digits.
fn scaled_mantissa(value: Decimal, scale: u32) -> Option<i128> {
    let factor = 10_i128.checked_pow(scale.checked_sub(value.scale())?)?;
    value
        .mantissa()
        .checked_mul(factor)
        .filter(|m| m.unsigned_abs() < 10_u128.pow(u32::from(DECIMAL_PRECISION)))
}

fn build_column(
    name: &str,
    values: &[&Value],
    column_type: ColumnType,
) -> Result<(DataType, ArrayRef), StorageError> {
    let column: (DataType, ArrayRef) = match column_type {
        ColumnType::Int => {
            let array: Int64Array = values.iter().map(|v| v.as_int()).collect();
            (DataType::Int64, Arc::new(array) as ArrayRef)
        }
        ColumnType::Decimal { scale } => {
            let arrow_scale = i8::try_from(scale).unwrap_or(i8::MAX);
            let mantissas = values
                .iter()
                .map(|v| {
                    v.as_decimal()
                        .map(|d| {
                            scaled_mantissa(d, scale).ok_or_else(|| StorageError::DecimalRange {
                                column: name.to_string(),
                                value: d,
                                scale,
                            })
                        })
                        .transpose()
                })
                .collect::<Result<Vec<_>, _>>()?;
            let array = Decimal128Array::from(mantissas)
                .with_precision_and_scale(DECIMAL_PRECISION, arrow_scale)?;
            (
                DataType::Decimal128(DECIMAL_PRECISION, arrow_scale),
                Arc::new(array) as ArrayRef,
            )
        }
        ColumnType::Date => {
            let array: Date32Array = values
                .iter()
                .map(|v| v.as_date().and_then(epoch_days))
                .collect();
            (DataType::Date32, Arc::new(array) as ArrayRef)
        }
        ColumnType::Text => {
            let array: StringArray = values
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect();
            (DataType::Utf8, Arc::new(array) as ArrayRef)
        }
    };
    Ok(column)
}

/// Converts a table into a single Arrow record batch.
///
/// # Errors
///
/// Returns `StorageError::DecimalRange` if a decimal column cannot share one
/// scale within 38 digits, or `StorageError::Arrow` if the arrays do not form
/// a valid batch.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch, StorageError> {
    let mut fields = Vec::with_capacity(table.columns().len());
    let mut arrays = Vec::with_capacity(table.columns().len());

    for (idx, name) in table.columns().iter().enumerate() {
        let values: Vec<&Value> = table.rows().map(|row| row.at(Some(idx))).collect();
        let column_type = ColumnType::infer(values.iter().copied());
        let (data_type, array) = build_column(name, &values, column_type)?;
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Writes a table as a Snappy-compressed Parquet file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be created, or an Arrow or
/// Parquet error if encoding fails.
pub fn write_parquet(path: &Path, table: &Table) -> Result<(), StorageError> {
    let batch = to_record_batch(table)?;
    let file = File::create(path).map_err(|err| StorageError::io(path, err))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use rust_decimal_macros::dec;

    fn sample() -> Table {
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        Table::from_rows(
            ["Key", "Amount", "Date", "Label", "Mixed"],
            vec![
                vec![
                    Value::Int(1),
                    Value::Decimal(Decimal::new(12_005, 1)),
                    day.into(),
                    "SBU_1".into(),
                    Value::Int(3),
                ],
                vec![
                    Value::Null,
                    Value::Decimal(Decimal::new(-50_025, 2)),
                    Value::Null,
                    Value::Null,
                    "x".into(),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_inferred_types() {
        let batch = to_record_batch(&sample()).unwrap();
        let schema = batch.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).data_type(), &DataType::Decimal128(38, 2));
        assert_eq!(schema.field(2).data_type(), &DataType::Date32);
        assert_eq!(schema.field(3).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(4).data_type(), &DataType::Utf8);
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(0).null_count(), 1);

        let amounts = batch
            .column(1)
            .as_any()
            .downcast_ref::<Decimal128Array>()
            .unwrap();
        assert_eq!(amounts.value(0), 120_050);
        assert_eq!(amounts.value(1), -50_025);

        let dates = batch.column(2).as_any().downcast_ref::<Date32Array>().unwrap();
        assert_eq!(dates.value(0), 20_093);
    }

    #[test]
    fn test_empty_table_has_schema() {
        let batch = to_record_batch(&Table::new(["DateKey", "Date"])).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().fields().len(), 2);
    }

    #[test]
    fn test_mixed_scales_keep_their_value() {
        let table = Table::from_rows(
            ["Amount"],
            vec![
                vec![Value::Decimal(dec!(0.0000000000000000001))],
                vec![Value::Decimal(dec!(123456789012))],
            ],
        )
        .unwrap();

        let batch = to_record_batch(&table).unwrap();
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Decimal128(38, 19));
        let amounts = batch
            .column(0)
            .as_any()
            .downcast_ref::<Decimal128Array>()
            .unwrap();
        assert_eq!(amounts.value(0), 1);
        assert_eq!(amounts.value(1), 1_234_567_890_120_000_000_000_000_000_000);
        assert_eq!(amounts.value_as_string(1), "123456789012.0000000000000000000");
    }

    #[test]
    fn test_unrepresentable_decimal_column() {
        let table = Table::from_rows(
            ["Amount"],
            vec![
                vec![Value::Decimal(dec!(0.0000000000000000000000000001))],
                vec![Value::Decimal(Decimal::MAX)],
            ],
        )
        .unwrap();

        let err = to_record_batch(&table).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DecimalRange { ref column, scale: 28, .. } if column == "Amount"
        ));
    }
}
