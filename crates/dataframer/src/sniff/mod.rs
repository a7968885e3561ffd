//! Format detection: compression, content shape and dialect.

mod dialect;
mod shape;

use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::{CompressionKind, Extent, decode, detect_compression};

pub use dialect::{Dialect, PREFERRED_DELIMITERS, Quoting, is_delimiter_candidate, sniff_dialect};
pub use shape::{ContentShape, GCT_MARKER, classify_shape, decode_text, first_line};

/// Number of decompressed bytes inspected to classify the content.
pub const PEEK_WINDOW: usize = 1024;

/// Everything the loader needs to know about the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SniffResult {
    pub compression: CompressionKind,
    pub shape: ContentShape,
    /// Present for delimited tables and GCT; absent for item lists.
    pub dialect: Option<Dialect>,
}

/// Runs the detection stages and leaves the source at offset 0.
pub fn sniff<R: Read + Seek>(source: &mut R) -> Result<SniffResult> {
    let compression = detect_compression(source)?;
    let prefix = decode(source, compression, Extent::Prefix(PEEK_WINDOW))?;
    let truncated = prefix.len() == PEEK_WINDOW;
    let text = decode_text(&prefix);

    let shape = classify_shape(&text);
    let dialect = match shape {
        ContentShape::GctMatrix => Some(Dialect::gct()),
        ContentShape::DelimitedTable => Some(sniff_dialect(complete_lines(&text, truncated))?),
        ContentShape::ItemList => None,
    };

    tracing::debug!(
        compression = %compression,
        shape = %shape,
        dialect = ?dialect,
        "sniffed input"
    );
    Ok(SniffResult {
        compression,
        shape,
        dialect,
    })
}

/// Drops the partial last line of a window that was cut short, as long as at
/// least one whole line remains.
fn complete_lines(text: &str, truncated: bool) -> &str {
    if !truncated {
        return text;
    }
    match text.trim_end_matches(['\n', '\r']).rfind('\n') {
        Some(end) if !text.ends_with(['\n', '\r']) => &text[..=end],
        _ => text,
    }
}
