//! Error types for table detection and loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::source::CompressionKind;

/// Errors that can occur while detecting or loading a table.
#[derive(Debug, Error)]
pub enum ParseError {
    // === Source Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read an input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Underlying source unreadable or not seekable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Envelope Errors ===
    /// Compression magic recognized but the container shape is not supported.
    #[error("unsupported {kind} input: {reason}")]
    UnsupportedCompression {
        kind: CompressionKind,
        reason: String,
    },

    /// Container or file structure is malformed.
    #[error("malformed input: {message}")]
    Format { message: String },

    // === Delimited Text Errors ===
    /// Delimiter could not be inferred from the sample.
    #[error("could not infer delimiter: {reason}")]
    Dialect { reason: String },

    /// Data row has a different field count than the header.
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Delimited content has no header record.
    #[error("input contains no header row")]
    EmptyInput,

    /// Tokenizer failure.
    #[error("failed to tokenize delimited text: {message}")]
    Csv { message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame conversion.
    #[cfg(feature = "polars")]
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl ParseError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(kind: CompressionKind, reason: impl Into<String>) -> Self {
        Self::UnsupportedCompression {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => Self::MalformedRow {
                line: pos.map_or(0, |p| p.line()),
                expected: expected_len as usize,
                found: len as usize,
            },
            other => Self::Csv {
                message: format!("{other:?}"),
            },
        }
    }
}

#[cfg(feature = "polars")]
impl From<polars::prelude::PolarsError> for ParseError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");
    }

    #[test]
    fn test_malformed_row_display() {
        let err = ParseError::MalformedRow {
            line: 3,
            expected: 4,
            found: 2,
        };
        assert_eq!(err.to_string(), "line 3: expected 4 fields, found 2");
    }

    #[test]
    fn test_unsupported_compression_display() {
        let err = ParseError::unsupported(CompressionKind::Zip, "archive holds 2 entries");
        assert_eq!(
            err.to_string(),
            "unsupported zip input: archive holds 2 entries"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: ParseError = io.into();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
