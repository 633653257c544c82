//! Extraction of the financial and audit inputs.

use chrono::{NaiveDate, NaiveDateTime};
use ledgerstar_shared::{Table, Value};
use tracing::info;

use super::error::EtlError;
use super::schema::{
    AUDIT_DATE_COLUMNS, AUDIT_LABEL, FINANCIAL_DATE_COLUMNS, FINANCIAL_LABEL,
    REQUIRED_AUDIT_COLUMNS, REQUIRED_FINANCIAL_COLUMNS, validate_columns,
};

/// A place a table can be loaded from.
pub trait TableSource {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    /// Loads the table, parsing `date_columns` as calendar dates.
    ///
    /// # Errors
    ///
    /// Returns `EtlError::NotFound` if the source does not exist, or
    /// `EtlError::Source` if it cannot be read.
    fn load(&self, date_columns: &[&str]) -> Result<Table, EtlError>;
}

impl TableSource for Table {
    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.len())
    }

    fn load(&self, date_columns: &[&str]) -> Result<Table, EtlError> {
        let mut table = self.clone();
        parse_date_columns(&mut table, date_columns);
        Ok(table)
    }
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses an ISO date, with or without a time part.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.date())
    })
}

/// Converts parseable text cells of `date_columns` into dates.
///
/// Absent columns are skipped. Unparsable cells are left as they are.
pub fn parse_date_columns(table: &mut Table, date_columns: &[&str]) {
    for column in date_columns {
        table.map_column(column, |value| match value {
            Value::Text(raw) => parse_date(raw).map_or_else(|| value.clone(), Value::Date),
            other => other.clone(),
        });
    }
}

/// Raw input tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    /// Financial transactions.
    pub financial: Table,
    /// Audit journal.
    pub audit: Table,
}

/// Loads both inputs and checks their schemas.
pub struct Extractor;

impl Extractor {
    /// Loads the financial and audit sources.
    ///
    /// Both sources are loaded before either schema is checked.
    ///
    /// # Errors
    ///
    /// Returns `EtlError::NotFound` or `EtlError::Source` from loading, then
    /// `EtlError::Schema` for the first table lacking required columns.
    pub fn extract<F, A>(financial: &F, audit: &A) -> Result<Extracted, EtlError>
    where
        F: TableSource + ?Sized,
        A: TableSource + ?Sized,
    {
        let financial_table = financial.load(&FINANCIAL_DATE_COLUMNS)?;
        let audit_table = audit.load(&AUDIT_DATE_COLUMNS)?;

        validate_columns(&financial_table, &REQUIRED_FINANCIAL_COLUMNS, FINANCIAL_LABEL)?;
        validate_columns(&audit_table, &REQUIRED_AUDIT_COLUMNS, AUDIT_LABEL)?;

        info!(
            financial = %financial.describe(),
            financial_rows = financial_table.len(),
            audit = %audit.describe(),
            audit_rows = audit_table.len(),
            "Extracted input tables"
        );

        Ok(Extracted {
            financial: financial_table,
            audit: audit_table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-01-05", Some((2025, 1, 5)))]
    #[case("2025-01-05 00:00:00", Some((2025, 1, 5)))]
    #[case("2025-01-05T13:45:10", Some((2025, 1, 5)))]
    #[case(" 2025-12-31 ", Some((2025, 12, 31)))]
    #[case("2025-02-30", None)]
    #[case("05/01/2025", None)]
    #[case("", None)]
    fn test_parse_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(raw), expected);
    }

    #[test]
    fn test_unparsable_dates_left_untouched() {
        let mut table = Table::from_rows(
            ["Posting_Date", "Memo"],
            vec![
                vec!["2025-01-05".into(), "2025-01-05".into()],
                vec!["not a date".into(), Value::Null],
            ],
        )
        .unwrap();
        parse_date_columns(&mut table, &["Posting_Date", "Due_Date"]);

        let first = table.row(0).unwrap();
        assert!(first.get("Posting_Date").as_date().is_some());
        assert_eq!(first.get("Memo"), &Value::text("2025-01-05"));
        assert_eq!(
            table.row(1).unwrap().get("Posting_Date"),
            &Value::text("not a date")
        );
    }

    #[test]
    fn test_in_memory_source_is_not_mutated() {
        let source = Table::from_rows(["Performed_On"], vec![vec!["2025-03-01".into()]]).unwrap();
        let loaded = source.load(&AUDIT_DATE_COLUMNS).unwrap();
        assert_eq!(source.row(0).unwrap().get("Performed_On"), &Value::text("2025-03-01"));
        assert!(loaded.row(0).unwrap().get("Performed_On").as_date().is_some());
    }
}
