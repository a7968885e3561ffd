//! Bare item lists: one value per line.

use crate::sniff::decode_text;
use crate::table::{Column, RowKey, Table};

use super::infer::infer_column;

/// Name of the single column of an item list.
pub const ITEM_COLUMN: &str = "item";

/// Loads each non-blank line as one row of the `item` column.
pub fn load_items(content: &[u8], first_row_only: bool) -> Table {
    let text = decode_text(content);
    let limit = if first_row_only { 1 } else { usize::MAX };
    let items: Vec<String> = text
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect();

    let row_keys = (0..items.len()).map(RowKey::Position).collect();
    Table::from_parts(
        None,
        row_keys,
        vec![Column::new(ITEM_COLUMN, infer_column(items))],
    )
}
