//! Type normalization of extracted tables.
//!
//! Malformed numbers become zero and malformed dates become `Null`. Numbers
//! that are well formed but outside the decimal range abort the run. Inputs
//! are never mutated.

use std::str::FromStr;

use ledgerstar_shared::{Table, Value};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use super::error::EtlError;
use super::extract::parse_date;

/// Canonical type of a normalized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Fixed-point number; malformed ⇒ `0`.
    Decimal,
    /// Integer flag or id; decimals truncate, malformed ⇒ `0`.
    Integer,
    /// Identifier text; `Null` ⇒ empty text.
    Text,
    /// Calendar date; malformed ⇒ `Null`.
    Date,
}

impl ColumnKind {
    /// Value used when a cell is null or malformed.
    #[must_use]
    pub fn fallback(self) -> Value {
        match self {
            Self::Decimal => Value::Decimal(Decimal::ZERO),
            Self::Integer => Value::Int(0),
            Self::Text => Value::text(""),
            Self::Date => Value::Null,
        }
    }
}

/// Column kinds applied to the financial table.
pub const FINANCIAL_COLUMN_KINDS: [(&str, ColumnKind); 7] = [
    ("Amount", ColumnKind::Decimal),
    ("Amount_Group_Currency", ColumnKind::Decimal),
    ("FX_Rate", ColumnKind::Decimal),
    ("Approved", ColumnKind::Integer),
    ("Intercompany_Flag", ColumnKind::Integer),
    ("Document_No", ColumnKind::Text),
    ("Posting_Date", ColumnKind::Date),
];

/// Column kinds applied to the audit table.
pub const AUDIT_COLUMN_KINDS: [(&str, ColumnKind); 4] = [
    ("Audit_ID", ColumnKind::Integer),
    ("New_Amount", ColumnKind::Decimal),
    ("Document_No", ColumnKind::Text),
    ("Performed_On", ColumnKind::Date),
];

/// Why a non-null cell could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceError {
    /// Not a value of the target kind.
    Malformed,
    /// A well-formed number the target kind cannot hold.
    OutOfRange,
}

fn parse_decimal(raw: &str) -> Result<Decimal, CoerceError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| classify(raw))
}

/// Finite numbers `f64` can read but `Decimal` cannot are out of range.
fn classify(raw: &str) -> CoerceError {
    if raw.parse::<f64>().is_ok_and(f64::is_finite) {
        CoerceError::OutOfRange
    } else {
        CoerceError::Malformed
    }
}

fn truncate(value: Decimal) -> Result<i64, CoerceError> {
    value.trunc().to_i64().ok_or(CoerceError::OutOfRange)
}

/// Converts one non-null cell to `kind`; `Null` maps to the kind's fallback.
///
/// # Errors
///
/// Returns `CoerceError::OutOfRange` for a number too large or too precise
/// for `kind`, and `CoerceError::Malformed` for anything else unconvertible.
pub fn coerce(value: &Value, kind: ColumnKind) -> Result<Value, CoerceError> {
    match (kind, value) {
        (_, Value::Null) => Ok(kind.fallback()),

        (ColumnKind::Decimal, Value::Decimal(_)) => Ok(value.clone()),
        (ColumnKind::Decimal, Value::Int(v)) => Ok(Value::Decimal(Decimal::from(*v))),
        (ColumnKind::Decimal, Value::Text(raw)) => parse_decimal(raw).map(Value::Decimal),

        (ColumnKind::Integer, Value::Int(_)) => Ok(value.clone()),
        (ColumnKind::Integer, Value::Decimal(v)) => truncate(*v).map(Value::Int),
        (ColumnKind::Integer, Value::Text(raw)) => match raw.trim().parse::<i64>() {
            Ok(v) => Ok(Value::Int(v)),
            Err(_) => parse_decimal(raw).and_then(truncate).map(Value::Int),
        },

        (ColumnKind::Text, Value::Text(_)) => Ok(value.clone()),
        (ColumnKind::Text, other) => Ok(Value::text(other.to_string())),

        (ColumnKind::Date, Value::Date(_)) => Ok(value.clone()),
        (ColumnKind::Date, Value::Text(raw)) => {
            parse_date(raw).map(Value::Date).ok_or(CoerceError::Malformed)
        }

        (ColumnKind::Decimal | ColumnKind::Integer, Value::Date(_))
        | (ColumnKind::Date, Value::Int(_) | Value::Decimal(_)) => Err(CoerceError::Malformed),
    }
}

/// Returns a copy of `table` with `kinds` applied to the columns present.
///
/// Malformed cells take the kind's fallback.
///
/// # Errors
///
/// Returns `EtlError::OutOfRange` if a column holds numbers its kind cannot
/// represent; replacing those with zero would change the totals.
pub fn normalize(table: &Table, kinds: &[(&str, ColumnKind)]) -> Result<Table, EtlError> {
    let mut normalized = table.clone();
    for &(column, kind) in kinds {
        let mut malformed = 0_usize;
        let mut out_of_range = 0_usize;
        let present = normalized.map_column(column, |value| {
            coerce(value, kind).unwrap_or_else(|err| {
                match err {
                    CoerceError::Malformed => malformed += 1,
                    CoerceError::OutOfRange => out_of_range += 1,
                }
                kind.fallback()
            })
        });

        if out_of_range > 0 {
            return Err(EtlError::OutOfRange {
                column: column.to_string(),
                count: out_of_range,
            });
        }
        if !present || malformed == 0 {
            continue;
        }
        if kind == ColumnKind::Date {
            warn!(column, malformed, "Unparsable dates replaced with nulls");
        } else {
            debug!(column, malformed, ?kind, "Malformed cells coerced");
        }
    }
    Ok(normalized)
}

/// Normalizes the financial table.
///
/// # Errors
///
/// See [`normalize`].
pub fn normalize_financial(financial: &Table) -> Result<Table, EtlError> {
    normalize(financial, &FINANCIAL_COLUMN_KINDS)
}

/// Normalizes the audit table.
///
/// # Errors
///
/// See [`normalize`].
pub fn normalize_audit(audit: &Table) -> Result<Table, EtlError> {
    normalize(audit, &AUDIT_COLUMN_KINDS)
}
