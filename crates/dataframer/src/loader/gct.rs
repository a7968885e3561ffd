//! GCT matrix loading.
//!
//! Layout:
//!
//! ```text
//! #1.2
//! <rows>\t<columns>
//! Name\tDescription\t<sample>...
//! <id>\t<description>\t<value>...
//! ```
//!
//! The name column supplies row keys and the description column is dropped.

use crate::error::{ParseError, Result};
use crate::sniff::{Dialect, decode_text};
use crate::table::Table;

use super::delimited::read_records;

/// Lines before the table header: the version marker and the dimensions.
const PREAMBLE_LINES: usize = 2;

/// Declared matrix size from the dimensions line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GctDimensions {
    pub rows: usize,
    pub columns: usize,
}

impl GctDimensions {
    /// Parses `rows<TAB>columns`; anything else yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split('\t').map(str::trim).filter(|p| !p.is_empty());
        let rows = parts.next()?.parse().ok()?;
        let columns = parts.next()?.parse().ok()?;
        Some(Self { rows, columns })
    }
}

/// Loads a GCT matrix.
pub fn load_gct(content: &[u8], first_row_only: bool) -> Result<Table> {
    let (preamble, body) = split_lines(content, PREAMBLE_LINES);
    let [_, dimensions_line] = preamble.as_slice() else {
        return Err(ParseError::format("GCT input ends before its dimensions line"));
    };
    let dimensions = GctDimensions::parse(&decode_text(dimensions_line));

    let mut raw = read_records(
        body,
        Dialect::gct(),
        true,
        first_row_only,
        PREAMBLE_LINES as u64,
    )
    .map_err(|err| match err {
        ParseError::EmptyInput => ParseError::format("GCT input has no column header line"),
        other => other,
    })?;
    if raw.headers.is_empty() {
        return Err(ParseError::format(
            "GCT header needs a name column and a description column",
        ));
    }
    let (description, _) = raw.remove_column(0);
    tracing::trace!(column = %description, "dropped GCT description column");

    if let Some(declared) = dimensions {
        let loaded = GctDimensions {
            rows: raw.row_keys.len(),
            columns: raw.headers.len(),
        };
        let rows_match = first_row_only || declared.rows == loaded.rows;
        if !rows_match || declared.columns != loaded.columns {
            tracing::warn!(?declared, ?loaded, "GCT dimensions line disagrees with body");
        }
    } else {
        tracing::warn!("GCT dimensions line is not two integers");
    }

    Ok(raw.into_table())
}

/// Splits off up to `count` leading lines (terminators stripped) and returns
/// them with the remaining content.
fn split_lines(content: &[u8], count: usize) -> (Vec<&[u8]>, &[u8]) {
    let mut lines = Vec::with_capacity(count);
    let mut rest = content;
    while lines.len() < count && !rest.is_empty() {
        let (line, remainder) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        lines.push(line.strip_suffix(b"\r").unwrap_or(line));
        rest = remainder;
    }
    (lines, rest)
}
