//! Table, Row, and Cell data structures

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

use super::schema::{CellType, Column};

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from named columns of values, inferring column types.
    ///
    /// Columns shorter than the longest one are padded with nulls.
    pub fn from_columns<N, V>(data: Vec<(N, Vec<V>)>) -> Self
    where
        N: Into<String>,
        V: Into<CellValue>,
    {
        let row_count = data.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
        let mut columns = Vec::with_capacity(data.len());
        let mut rows: Vec<Vec<CellValue>> = (0..row_count).map(|_| Vec::new()).collect();

        for (name, values) in data {
            columns.push(Column::new(name));
            let mut values = values.into_iter().map(Into::into);
            for row in &mut rows {
                row.push(values.next().unwrap_or(CellValue::Null));
            }
        }

        let mut table = Table::new(columns);
        for (i, cells) in rows.into_iter().enumerate() {
            table.add_row(cells, i + 1);
        }
        table.infer_column_types();
        table
    }

    /// Add a row, padding or truncating it to the column count
    pub fn add_row(&mut self, mut cells: Vec<CellValue>, source_line: usize) {
        cells.resize(self.column_count(), CellValue::Null);
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Remove a column by name, returning its metadata
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row.cells.remove(idx);
        }
        Some(self.columns.remove(idx))
    }

    /// Append a column at the end of the table
    pub fn push_column(&mut self, column: Column, values: Vec<CellValue>) -> Result<()> {
        if values.len() != self.row_count() {
            return Err(PrepError::RowLength {
                column: column.name,
                expected: self.row_count(),
                actual: values.len(),
            });
        }

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.cells.push(value);
        }
        self.columns.push(column);
        Ok(())
    }

    /// Rewrite every cell of a column in place
    pub fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.cells.get_mut(index) {
                *cell = f(cell);
            }
        }
    }

    /// Turn every non-null cell of a mixed-type column into its text
    pub fn stringify_mixed_columns(&mut self) {
        for idx in 0..self.column_count() {
            if self.columns[idx].inferred_type != CellType::Mixed {
                continue;
            }
            self.map_column(idx, |cell| match cell {
                CellValue::Null => CellValue::Null,
                other => CellValue::String(Cow::Owned(other.display().into_owned())),
            });
            self.columns[idx].inferred_type = CellType::String;
        }
    }

    /// Reserve room in every row for `additional` more cells
    pub fn reserve_columns(&mut self, additional: usize) {
        for row in &mut self.rows {
            row.cells.reserve(additional);
        }
        self.columns.reserve(additional);
    }

    /// Infer column types from data
    pub fn infer_column_types(&mut self) {
        for col_idx in 0..self.column_count() {
            self.infer_column_type(col_idx);
        }
    }

    /// Re-infer one column's type from its current values
    pub fn infer_column_type(&mut self, index: usize) {
        let inferred = self
            .column_values(index)
            .fold(CellType::Null, |acc, cell| acc.widen(CellType::of(cell)));

        if let Some(col) = self.columns.get_mut(index) {
            col.inferred_type = inferred;
        }
    }
}
