use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{ColumnName, RawCellValue};

/// Storage type of a typed table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// UTF-8 string column.
    Utf8,
    /// 64-bit float column (nutrients, embeddings, the 0/1 anomaly label).
    Double,
    /// Strict boolean column (tags and flags).
    Boolean,
}

/// A single typed cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// No value. Cleaned tables contain no `Missing` cells; the variant
    /// exists so intermediate states and defensive fills are expressible.
    Missing,
    /// String value (identifier and text columns).
    Text(String),
    /// Numeric value (nutrients, embeddings, the 0/1 anomaly label).
    Number(f64),
    /// Strict boolean value (tag and flag columns).
    Bool(bool),
}

impl Cell {
    /// Borrow the text value, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The numeric value, if this is a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean cell.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// True for the `Missing` variant.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render the cell back to its raw string form (`None` for missing).
    ///
    /// Numbers use `f64` display (shortest round-tripping form), booleans
    /// render as `true`/`false`; both re-coerce to the same cell, which is
    /// what makes `clean` idempotent over [`Table::to_raw`] output.
    pub fn render(&self) -> Option<RawCellValue> {
        match self {
            Cell::Missing => None,
            Cell::Text(value) => Some(value.clone()),
            Cell::Number(value) => Some(format!("{value}")),
            Cell::Bool(value) => Some(format!("{value}")),
        }
    }
}

/// Untyped table as read from the source: nullable string cells under a
/// flat header row. Empty source cells are represented as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<ColumnName>,
    rows: Vec<Vec<Option<RawCellValue>>>,
}

impl RawTable {
    /// Create an empty raw table with the given header.
    pub fn new(columns: Vec<ColumnName>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; it is padded or truncated to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<RawCellValue>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Header names in source order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Position of `name` in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// All rows, each padded to the header width.
    pub fn rows(&self) -> &[Vec<Option<RawCellValue>>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw cell lookup; `None` both for missing cells and unknown columns.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}

/// Typed, column-ordered table produced by the cleaning engine.
///
/// Column order is significant (projection order, then appended embedding
/// columns) and is preserved by the `IndexMap` keying.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: IndexMap<ColumnName, ColumnKind>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty typed table with the given ordered columns.
    pub fn new(columns: IndexMap<ColumnName, ColumnKind>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Column names and kinds in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.columns.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Position of `name` among the columns, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Declared kind of `name`, if present.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns.get(name).copied()
    }

    /// Append a row; the caller is responsible for matching column order.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Mutable access to the rows; column alignment is the caller's duty.
    pub fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.rows
    }

    /// Cell lookup by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Append a column with one cell per existing row.
    ///
    /// `cells` shorter than the row count is padded with `Missing`;
    /// a duplicate name replaces the existing column's kind and cells.
    pub fn add_column(&mut self, name: ColumnName, kind: ColumnKind, mut cells: Vec<Cell>) {
        cells.resize(self.rows.len(), Cell::Missing);
        if let Some(idx) = self.columns.get_index_of(&name) {
            self.columns[idx] = kind;
            for (row, cell) in self.rows.iter_mut().zip(cells) {
                row[idx] = cell;
            }
        } else {
            self.columns.insert(name, kind);
            for (row, cell) in self.rows.iter_mut().zip(cells) {
                row.push(cell);
            }
        }
    }

    /// Remove a column and its cells, preserving the order of the rest.
    /// Returns false when the column was not present.
    pub fn remove_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.columns.get_index_of(name) else {
            return false;
        };
        self.columns.shift_remove_index(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Render the table back into raw string form.
    ///
    /// Used by re-cleaning flows and idempotence checks; every cell renders
    /// to a string that coerces back to the identical typed cell.
    pub fn to_raw(&self) -> RawTable {
        let mut raw = RawTable::new(self.columns.keys().cloned().collect());
        for row in &self.rows {
            raw.push_row(row.iter().map(Cell::render).collect());
        }
        raw
    }
}
