//! Content shape classification on a decoded prefix.

use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};

/// Literal marker that opens every GCT file.
pub const GCT_MARKER: &str = "#1.2";

/// Coarse structure of the decompressed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentShape {
    /// GCT matrix: marker line, dimensions line, then a tab-delimited table.
    GctMatrix,
    /// Delimited text table with a header row.
    DelimitedTable,
    /// One bare item per line.
    ItemList,
}

impl ContentShape {
    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::GctMatrix => "GCT",
            Self::DelimitedTable => "delimited",
            Self::ItemList => "item list",
        }
    }
}

impl std::fmt::Display for ContentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Decodes bytes with the fixed single-byte encoding.
///
/// Every byte maps to exactly one character, so this never fails. No BOM is
/// stripped.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Returns the text up to the first line terminator.
pub fn first_line(text: &str) -> &str {
    text.split(['\n', '\r']).next().unwrap_or_default()
}

/// Classifies the content from its decoded prefix.
///
/// A first line made only of `[A-Za-z0-9_]` characters is taken as an item
/// list. That includes a lone number, a one-column header and empty input.
pub fn classify_shape(prefix: &str) -> ContentShape {
    if prefix.starts_with(GCT_MARKER) {
        return ContentShape::GctMatrix;
    }
    let is_word_line = first_line(prefix)
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_word_line {
        ContentShape::ItemList
    } else {
        ContentShape::DelimitedTable
    }
}
