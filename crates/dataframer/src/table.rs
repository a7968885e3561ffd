//! Typed table model produced by the loader.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a table row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    /// Zero-based row position.
    Position(usize),
    /// Raw value of the row-key column.
    Value(String),
}

impl RowKey {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(f, "{position}"),
            Self::Value(value) => f.write_str(value),
        }
    }
}

/// Cells of one column, tagged by inferred type. `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Numeric(values) => Some(values),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match self {
            Self::Text(values) => Some(values),
            Self::Numeric(_) => None,
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.data.is_numeric()
    }
}

/// Named typed columns aligned to an ordered sequence of row keys.
///
/// Invariants: column names are unique, and every column holds exactly one
/// cell per row key.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index_name: Option<String>,
    row_keys: Vec<RowKey>,
    columns: Vec<Column>,
}

impl Table {
    pub(crate) fn from_parts(
        index_name: Option<String>,
        row_keys: Vec<RowKey>,
        columns: Vec<Column>,
    ) -> Self {
        debug_assert!(columns.iter().all(|c| c.data.len() == row_keys.len()));
        debug_assert!(
            columns
                .iter()
                .enumerate()
                .all(|(i, c)| columns[..i].iter().all(|other| other.name != c.name))
        );
        Self {
            index_name,
            row_keys,
            columns,
        }
    }

    /// Header of the row-key column, when the keys came from one.
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn row_keys(&self) -> &[RowKey] {
        &self.row_keys
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.row_keys.len()
    }

    /// Number of data columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// First column whose cells were inferred as text.
    pub fn first_text_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| !c.is_numeric())
    }

    /// Numeric values of one row, in column order, skipping text columns.
    pub fn numeric_row(&self, row: usize) -> Option<Vec<Option<f64>>> {
        if row >= self.height() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .filter_map(|c| c.data.as_numeric().map(|values| values[row]))
                .collect(),
        )
    }

    pub(crate) fn retain_columns(&mut self, keep: impl FnMut(&Column) -> bool) {
        self.columns.retain(keep);
    }
}

/// Display labels keyed by row key.
pub type LabelMap = BTreeMap<RowKey, String>;

/// Output of a parse: the table plus labels when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub table: Table,
    pub label_map: Option<LabelMap>,
}
