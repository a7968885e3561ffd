//! Caller-option post-processing: label synthesis, then text filtering.

use crate::options::ParseOptions;
use crate::table::{Column, LabelMap, ParseResult, Table};

/// Separator between the text label and the row key.
pub const LABEL_SEPARATOR: &str = " / ";

/// Builds a label for every row key.
///
/// The label is the first text column's value for the row, if there is one,
/// joined with the row key. The row key is always part of the label.
pub fn synthesize_labels(table: &Table) -> LabelMap {
    let texts = table.first_text_column().and_then(|c| c.data.as_text());

    table
        .row_keys()
        .iter()
        .enumerate()
        .map(|(row, key)| {
            let key_text = key.to_string();
            let label = match texts.and_then(|values| values[row].as_deref()) {
                Some(text) => format!("{text}{LABEL_SEPARATOR}{key_text}"),
                None => key_text,
            };
            (key.clone(), label)
        })
        .collect()
}

/// Drops every text column, keeping numeric columns and row keys.
pub fn retain_numeric(table: &mut Table) {
    table.retain_columns(Column::is_numeric);
}

/// Applies the options in fixed order: labels are captured before text
/// columns are discarded.
pub fn postprocess(mut table: Table, options: &ParseOptions) -> ParseResult {
    let label_map = options.relabel.then(|| synthesize_labels(&table));

    if !options.keep_strings {
        let before = table.width();
        retain_numeric(&mut table);
        tracing::debug!(dropped = before - table.width(), "dropped text columns");
    }

    ParseResult { table, label_map }
}
