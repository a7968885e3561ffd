//! End-to-end parse: detect, load, post-process.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::{ParseError, Result};
use crate::loader::load_table;
use crate::options::ParseOptions;
use crate::postprocess::postprocess;
use crate::sniff::sniff;
use crate::table::ParseResult;

/// Detects the format of `source` and parses it into a table.
///
/// The source is read three times from offset 0: a two-byte compression
/// probe, a bounded prefix for classification, and the full load.
pub fn parse<R: Read + Seek>(mut source: R, options: ParseOptions) -> Result<ParseResult> {
    let sniffed = sniff(&mut source)?;
    let table = load_table(&mut source, &sniffed, &options)?;
    Ok(postprocess(table, &options))
}

/// Parses an in-memory buffer.
pub fn parse_bytes(bytes: &[u8], options: ParseOptions) -> Result<ParseResult> {
    parse(Cursor::new(bytes), options)
}

/// Opens and parses a file.
pub fn parse_path(path: &Path, options: ParseOptions) -> Result<ParseResult> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ParseError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ParseError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    tracing::debug!(path = %path.display(), "parsing file");
    parse(file, options)
}
