//! Row-major in-memory table with named columns.

use thiserror::Error;

use super::value::Value;

static NULL: Value = Value::Null;

/// Errors raised by table construction and projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A referenced column does not exist.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A row does not have one value per column.
    #[error("Row has {actual} values but the table has {expected} columns")]
    WidthMismatch {
        /// Number of columns.
        expected: usize,
        /// Number of values in the offending row.
        actual: usize,
    },
}

/// A table of named columns and rows of `Value`s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates a table and fills it with rows.
    ///
    /// # Errors
    ///
    /// Returns `TableError::WidthMismatch` if any row has the wrong width.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Creates a table from fixed-width rows.
    ///
    /// The row type carries the column count, so no width check is needed.
    #[must_use]
    pub fn from_arrays<const N: usize>(
        columns: [&str; N],
        rows: impl IntoIterator<Item = [Value; N]>,
    ) -> Self {
        Self {
            columns: columns.map(String::from).to_vec(),
            rows: rows.into_iter().map(Vec::from).collect(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns `TableError::WidthMismatch` if the row has the wrong width.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::WidthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, if present.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns true if the column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over row views.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            table: self,
            values,
        })
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            table: self,
            values,
        })
    }

    /// Iterates over one column's values, or `None` if it is absent.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Replaces every value of a column with `f(value)`.
    ///
    /// Returns false (and does nothing) if the column is absent.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> bool
    where
        F: FnMut(&Value) -> Value,
    {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        true
    }

    /// Projects the table onto `names`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownColumn` for the first absent column.
    pub fn select(&self, names: &[&str]) -> Result<Self, TableError> {
        let indices = names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::UnknownColumn((*name).to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Self {
            columns: names.iter().map(|n| (*n).to_string()).collect(),
            rows,
        })
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Value of a named column; `Null` if the column is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &'a Value {
        self.table
            .column_index(name)
            .map_or(&NULL, |idx| &self.values[idx])
    }

    /// Value at a pre-resolved column position; `Null` for `None`.
    #[must_use]
    pub fn at(&self, index: Option<usize>) -> &'a Value {
        index.and_then(|idx| self.values.get(idx)).unwrap_or(&NULL)
    }

    /// All values in column order.
    #[must_use]
    pub const fn values(&self) -> &'a [Value] {
        self.values
    }
}
