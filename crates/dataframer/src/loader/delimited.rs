//! Delimited text reading with a sniffed dialect.

use csv::{ByteRecord, ReaderBuilder};

use crate::error::{ParseError, Result};
use crate::sniff::{Dialect, Quoting, decode_text};
use crate::table::{Column, RowKey, Table};

use super::header::Headers;
use super::infer::infer_column;

/// Column count above which a table is reported as unusually wide.
pub const WIDE_TABLE_COLUMNS: usize = 10_000;

/// Raw text cells buffered per column, before type inference.
#[derive(Debug, Clone)]
pub(crate) struct RawTable {
    pub headers: Headers,
    pub row_keys: Vec<RowKey>,
    pub cells: Vec<Vec<String>>,
}

impl RawTable {
    /// Removes a data column by position, returning its name and cells.
    pub fn remove_column(&mut self, position: usize) -> (String, Vec<String>) {
        let name = self.headers.columns.remove(position);
        let cells = self.cells.remove(position);
        (name, cells)
    }

    /// Runs type inference on every column.
    pub fn into_table(self) -> Table {
        let columns = self
            .headers
            .columns
            .into_iter()
            .zip(self.cells)
            .map(|(name, cells)| Column::new(name, infer_column(cells)))
            .collect();
        Table::from_parts(self.headers.index_name, self.row_keys, columns)
    }
}

/// Reads a delimited body whose first record is the header.
///
/// `line_offset` is added to reported line numbers for content that was cut
/// from a larger file.
pub(crate) fn read_records(
    content: &[u8],
    dialect: Dialect,
    index_column: bool,
    first_row_only: bool,
    line_offset: u64,
) -> Result<RawTable> {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter);
    match dialect.quote {
        Quoting::None => {
            builder.quoting(false);
        }
        Quoting::Char(quote) => {
            builder.quoting(true).quote(quote).double_quote(true);
        }
    }
    let mut reader = builder.from_reader(content);
    let mut records = reader.byte_records();

    let header = records.next().ok_or(ParseError::EmptyInput)??;
    let expected = header.len();
    let headers = Headers::from_record(&decode_record(&header), index_column);

    if headers.len() > WIDE_TABLE_COLUMNS {
        tracing::warn!(
            columns = headers.len(),
            "table has more than {WIDE_TABLE_COLUMNS} columns"
        );
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut row_keys = Vec::new();

    for record in records {
        let record = record?;
        if record.len() != expected {
            return Err(ParseError::MalformedRow {
                line: record.position().map_or(0, csv::Position::line) + line_offset,
                expected,
                found: record.len(),
            });
        }

        let mut fields = decode_record(&record).into_iter();
        let key = if index_column {
            RowKey::Value(fields.next().unwrap_or_default().trim().to_string())
        } else {
            RowKey::Position(row_keys.len())
        };
        for (column, value) in cells.iter_mut().zip(fields) {
            column.push(value);
        }
        row_keys.push(key);

        if first_row_only {
            break;
        }
    }

    Ok(RawTable {
        headers,
        row_keys,
        cells,
    })
}

/// Loads a delimited table.
pub fn load_delimited(
    content: &[u8],
    dialect: Dialect,
    index_column: bool,
    first_row_only: bool,
) -> Result<Table> {
    let raw = read_records(content, dialect, index_column, first_row_only, 0)?;
    Ok(raw.into_table())
}

fn decode_record(record: &ByteRecord) -> Vec<String> {
    record.iter().map(decode_text).collect()
}
