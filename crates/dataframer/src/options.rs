//! Caller options for a parse.

use serde::{Deserialize, Serialize};

/// Options controlling how a parsed table is shaped.
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Use the first column as row keys instead of data.
    pub col_zero_index: bool,

    /// Keep text columns in the output table.
    pub keep_strings: bool,

    /// Build a label map from the first text column and the row key.
    pub relabel: bool,

    /// Load at most one data row.
    pub first_row_only: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            col_zero_index: true,
            keep_strings: false,
            relabel: false,
            first_row_only: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_col_zero_index(mut self, enable: bool) -> Self {
        self.col_zero_index = enable;
        self
    }

    pub fn with_keep_strings(mut self, enable: bool) -> Self {
        self.keep_strings = enable;
        self
    }

    pub fn with_relabel(mut self, enable: bool) -> Self {
        self.relabel = enable;
        self
    }

    pub fn with_first_row_only(mut self, enable: bool) -> Self {
        self.first_row_only = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(options.col_zero_index);
        assert!(!options.keep_strings);
        assert!(!options.relabel);
        assert!(!options.first_row_only);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::new()
            .with_col_zero_index(false)
            .with_keep_strings(true)
            .with_relabel(true)
            .with_first_row_only(true);
        assert!(!options.col_zero_index);
        assert!(options.keep_strings);
        assert!(options.relabel);
        assert!(options.first_row_only);
    }

    #[test]
    fn test_partial_json() {
        let options: ParseOptions = serde_json::from_str(r#"{"relabel": true}"#).unwrap();
        assert_eq!(options, ParseOptions::default().with_relabel(true));
    }
}
