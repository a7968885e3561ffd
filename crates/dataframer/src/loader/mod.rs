//! Full-content loading into a typed [`Table`].

mod delimited;
mod gct;
mod header;
mod infer;
mod list;

use std::io::{Read, Seek};

use crate::error::{ParseError, Result};
use crate::options::ParseOptions;
use crate::sniff::{ContentShape, SniffResult};
use crate::source::{Extent, decode};
use crate::table::Table;

pub use delimited::{WIDE_TABLE_COLUMNS, load_delimited};
pub use gct::{GctDimensions, load_gct};
pub use header::{Headers, normalize_header};
pub use infer::{infer_column, parse_number};
pub use list::{ITEM_COLUMN, load_items};

/// Decodes the whole source and loads it with the strategy for its shape.
///
/// The source is left at offset 0.
pub fn load_table<R: Read + Seek>(
    source: &mut R,
    sniffed: &SniffResult,
    options: &ParseOptions,
) -> Result<Table> {
    let content = decode(source, sniffed.compression, Extent::Full)?;

    let table = match sniffed.shape {
        ContentShape::GctMatrix => load_gct(&content, options.first_row_only)?,
        ContentShape::DelimitedTable => {
            let dialect = sniffed.dialect.ok_or_else(|| ParseError::Dialect {
                reason: "delimited input without a dialect".to_string(),
            })?;
            load_delimited(
                &content,
                dialect,
                options.col_zero_index,
                options.first_row_only,
            )?
        }
        ContentShape::ItemList => load_items(&content, options.first_row_only),
    };

    tracing::debug!(
        shape = %sniffed.shape,
        rows = table.height(),
        columns = table.width(),
        "loaded table"
    );
    Ok(table)
}
