//! Dimension tables and natural-key lookups.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use ledgerstar_shared::{Table, Value};
use tracing::info;

use super::error::EtlError;
use super::schema::missing_columns;

/// Columns of `DimDate`.
pub const DIM_DATE_COLUMNS: [&str; 6] =
    ["DateKey", "Date", "Year", "Quarter", "Month", "MonthName"];

/// Integer date key, `YYYYMMDD`.
#[must_use]
pub fn date_key(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Builds a contiguous daily calendar covering every `Posting_Date`.
///
/// Null or unparsed dates are ignored; with no dates the table is empty.
#[must_use]
pub fn build_dim_date(financial: &Table) -> Table {
    let dates = financial
        .column_values("Posting_Date")
        .into_iter()
        .flatten()
        .filter_map(Value::as_date);
    let Some((min, max)) = dates.fold(None, |range: Option<(NaiveDate, NaiveDate)>, d| {
        Some(range.map_or((d, d), |(lo, hi)| (lo.min(d), hi.max(d))))
    }) else {
        return Table::new(DIM_DATE_COLUMNS);
    };

    let calendar = min.iter_days().take_while(|d| *d <= max).map(|day| {
        [
            Value::Int(date_key(day)),
            Value::Date(day),
            Value::Int(i64::from(day.year())),
            Value::text(format!("Q{}", (day.month() - 1) / 3 + 1)),
            Value::Int(i64::from(day.month())),
            Value::text(day.format("%B").to_string()),
        ]
    });
    Table::from_arrays(DIM_DATE_COLUMNS, calendar)
}

/// Builds a dimension over `natural_key` with a dense surrogate key.
///
/// Distinct key combinations keep their first-seen order; the first gets
/// key 1. Output columns are `[key_name, natural_key...]`.
///
/// # Errors
///
/// Returns `EtlError::Schema` if a natural-key column is absent.
pub fn build_dimension(
    table: &Table,
    natural_key: &[&str],
    key_name: &str,
) -> Result<Table, EtlError> {
    let missing = missing_columns(table, natural_key);
    if !missing.is_empty() {
        return Err(EtlError::Schema {
            label: format!("{key_name} source"),
            missing,
        });
    }

    let projected = table.select(natural_key)?;
    let mut seen = HashSet::with_capacity(projected.len());
    let mut columns = Vec::with_capacity(natural_key.len() + 1);
    columns.push(key_name);
    columns.extend_from_slice(natural_key);
    let mut dimension = Table::new(columns);

    let mut key: i64 = 0;
    for row in projected.rows() {
        if !seen.insert(row.values()) {
            continue;
        }
        key += 1;
        let mut values = Vec::with_capacity(natural_key.len() + 1);
        values.push(Value::Int(key));
        values.extend_from_slice(row.values());
        dimension.push_row(values)?;
    }

    Ok(dimension)
}

/// A dimension derived from the financial table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSpec {
    /// Model table name.
    pub table: &'static str,
    /// Surrogate key column.
    pub key: &'static str,
    /// Natural-key columns.
    pub natural_key: &'static [&'static str],
}

/// `DimAccount`.
pub const ACCOUNT: DimensionSpec = DimensionSpec {
    table: "DimAccount",
    key: "AccountKey",
    natural_key: &["Account_No", "Account_Name", "Category"],
};

/// `DimDepartment`.
pub const DEPARTMENT: DimensionSpec = DimensionSpec {
    table: "DimDepartment",
    key: "DepartmentKey",
    natural_key: &["Department", "Cost_Center"],
};

/// `DimSubsidiary`.
pub const SUBSIDIARY: DimensionSpec = DimensionSpec {
    table: "DimSubsidiary",
    key: "SubsidiaryKey",
    natural_key: &["Subsidiary"],
};

impl DimensionSpec {
    /// Builds this dimension from `source`.
    ///
    /// # Errors
    ///
    /// See [`build_dimension`].
    pub fn build(&self, source: &Table) -> Result<Table, EtlError> {
        build_dimension(source, self.natural_key, self.key)
    }
}

/// Natural key to surrogate key lookup over a built dimension.
#[derive(Debug, Clone)]
pub struct DimensionIndex {
    spec: DimensionSpec,
    keys: HashMap<Vec<Value>, i64>,
}

impl DimensionIndex {
    /// Indexes a dimension table built from `spec`.
    #[must_use]
    pub fn new(spec: DimensionSpec, dimension: &Table) -> Self {
        let key_idx = dimension.column_index(spec.key);
        let natural_idx: Vec<_> = spec
            .natural_key
            .iter()
            .map(|c| dimension.column_index(c))
            .collect();

        let keys = dimension
            .rows()
            .filter_map(|row| {
                let key = row.at(key_idx).as_int()?;
                let natural = natural_idx.iter().map(|&i| row.at(i).clone()).collect();
                Some((natural, key))
            })
            .collect();

        Self { spec, keys }
    }

    /// The dimension this index was built for.
    #[must_use]
    pub const fn spec(&self) -> DimensionSpec {
        self.spec
    }

    /// Surrogate key of a natural-key combination.
    #[must_use]
    pub fn lookup(&self, natural: &[Value]) -> Option<i64> {
        self.keys.get(natural).copied()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the dimension has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The four dimension tables of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSet {
    /// `DimDate`.
    pub date: Table,
    /// `DimAccount`.
    pub account: Table,
    /// `DimDepartment`.
    pub department: Table,
    /// `DimSubsidiary`.
    pub subsidiary: Table,
}

impl DimensionSet {
    /// Builds every dimension from a normalized financial table.
    ///
    /// # Errors
    ///
    /// Returns `EtlError::Schema` if a natural-key column is absent.
    pub fn build(financial: &Table) -> Result<Self, EtlError> {
        let set = Self {
            date: build_dim_date(financial),
            account: ACCOUNT.build(financial)?,
            department: DEPARTMENT.build(financial)?,
            subsidiary: SUBSIDIARY.build(financial)?,
        };
        info!(
            dates = set.date.len(),
            accounts = set.account.len(),
            departments = set.department.len(),
            subsidiaries = set.subsidiary.len(),
            "Dimensions built"
        );
        Ok(set)
    }

    /// Lookups for the account, department and subsidiary dimensions.
    #[must_use]
    pub fn indexes(&self) -> [DimensionIndex; 3] {
        [
            DimensionIndex::new(ACCOUNT, &self.account),
            DimensionIndex::new(DEPARTMENT, &self.department),
            DimensionIndex::new(SUBSIDIARY, &self.subsidiary),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key(date(2025, 1, 5)), 20_250_105);
        assert_eq!(date_key(date(2025, 12, 31)), 20_251_231);
    }

    #[test]
    fn test_dim_date_spans_gaps() {
        let financial = Table::from_rows(
            ["Posting_Date"],
            vec![
                vec![date(2025, 3, 30).into()],
                vec![Value::Null],
                vec![date(2025, 4, 2).into()],
            ],
        )
        .unwrap();
        let dim = build_dim_date(&financial);

        assert_eq!(dim.len(), 4);
        let last = dim.row(3).unwrap();
        assert_eq!(last.get("DateKey"), &Value::Int(20_250_402));
        assert_eq!(last.get("Quarter"), &Value::text("Q2"));
        assert_eq!(last.get("Month"), &Value::Int(4));
        assert_eq!(last.get("MonthName"), &Value::text("April"));
        assert_eq!(dim.row(0).unwrap().get("Quarter"), &Value::text("Q1"));
    }

    #[test]
    fn test_dim_date_without_dates_is_empty() {
        let financial = Table::from_rows(["Posting_Date"], vec![vec![Value::Null]]).unwrap();
        let dim = build_dim_date(&financial);
        assert!(dim.is_empty());
        assert_eq!(dim.columns().len(), 6);
    }

    #[test]
    fn test_build_dimension_first_seen_order() {
        let table = Table::from_rows(
            ["Department", "Cost_Center", "Amount"],
            vec![
                vec!["Warehouse".into(), "CC_Warehouse".into(), Value::Int(1)],
                vec!["Finance".into(), "CC_Finance".into(), Value::Int(2)],
                vec!["Warehouse".into(), "CC_Warehouse".into(), Value::Int(3)],
                vec!["Admin".into(), "CC_Admin".into(), Value::Int(4)],
            ],
        )
        .unwrap();
        let dim = DEPARTMENT.build(&table).unwrap();

        assert_eq!(dim.columns(), ["DepartmentKey", "Department", "Cost_Center"]);
        assert_eq!(dim.len(), 3);
        let names: Vec<_> = dim.column_values("Department").unwrap().cloned().collect();
        assert_eq!(names, vec![Value::text("Warehouse"), "Finance".into(), "Admin".into()]);
        let keys: Vec<_> = dim.column_values("DepartmentKey").unwrap().cloned().collect();
        assert_eq!(keys, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

        let index = DimensionIndex::new(DEPARTMENT, &dim);
        assert_eq!(index.lookup(&[Value::text("Finance"), Value::text("CC_Finance")]), Some(2));
        assert_eq!(index.lookup(&[Value::text("Finance"), Value::text("CC_Admin")]), None);
    }

    #[test]
    fn test_build_dimension_missing_column() {
        let table = Table::new(["Subsidiary"]);
        let err = ACCOUNT.build(&table).unwrap_err();
        assert!(matches!(
            err,
            EtlError::Schema { missing, .. } if missing == ["Account_Name", "Account_No", "Category"]
        ));
    }
}
