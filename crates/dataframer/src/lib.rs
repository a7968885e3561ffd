//! Load any tabular file into a typed table.
//!
//! This crate takes a byte stream of unknown provenance, works out what is
//! inside it, and parses it once into a uniform [`Table`] of named numeric or
//! text columns plus row keys.
//!
//! # Features
//!
//! - **Compression detection**: gzip (single member) and zip (single entry)
//!   by magic bytes, never by file extension
//! - **Shape classification**: GCT matrices, delimited tables, bare item lists
//! - **Dialect inference**: any common single-character delimiter, with quoting
//! - **Type inference**: each column is numeric or text
//! - **Post-processing**: row-key selection, label synthesis, text filtering
//! - Optional Polars DataFrame conversion (with `polars` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use dataframer::{ParseOptions, parse_path};
//!
//! let options = ParseOptions::default().with_relabel(true);
//! let result = parse_path(Path::new("expression.gct.gz"), options)?;
//!
//! println!("{} rows x {} columns", result.table.height(), result.table.width());
//! if let Some(labels) = &result.label_map {
//!     for (key, label) in labels {
//!         println!("{key}: {label}");
//!     }
//! }
//! # Ok::<(), dataframer::ParseError>(())
//! ```

mod error;
mod loader;
mod options;
mod pipeline;
mod postprocess;
mod sniff;
mod source;
mod table;

#[cfg(feature = "polars")]
mod polars_ext;

// === Error Types ===
pub use error::{ParseError, Result};

// === Configuration ===
pub use options::ParseOptions;

// === Entry Points ===
pub use pipeline::{parse, parse_bytes, parse_path};

// === Detection ===
pub use sniff::{
    ContentShape, Dialect, GCT_MARKER, PEEK_WINDOW, PREFERRED_DELIMITERS, Quoting, SniffResult,
    classify_shape, decode_text, first_line, is_delimiter_candidate, sniff, sniff_dialect,
};
pub use source::{CompressionKind, Extent, decode, detect_compression, rewind};

// === Loading ===
pub use loader::{
    GctDimensions, Headers, ITEM_COLUMN, WIDE_TABLE_COLUMNS, infer_column, load_delimited,
    load_gct, load_items, load_table, normalize_header, parse_number,
};

// === Post-processing ===
pub use postprocess::{LABEL_SEPARATOR, postprocess, retain_numeric, synthesize_labels};

// === Table Model ===
pub use table::{Column, ColumnData, LabelMap, ParseResult, RowKey, Table};

#[cfg(feature = "polars")]
pub use polars_ext::DEFAULT_INDEX_NAME;
