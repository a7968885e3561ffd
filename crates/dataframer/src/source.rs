//! Compression envelope detection and decoding.
//!
//! The raw source is only ever positioned, never consumed for good: every
//! entry point rewinds to offset 0 before it reads and again before it
//! returns, so the next stage always starts from the same place. Each call to
//! [`decode`] opens its own decoder, which keeps the peek handle and the full
//! load handle apart.

use std::fmt;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

use flate2::bufread::GzDecoder;
use serde::{Deserialize, Serialize};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{ParseError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression envelope around the table content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressionKind {
    /// Plain bytes.
    None,
    /// Single-member gzip stream.
    Gzip,
    /// Zip archive holding exactly one file.
    Zip,
}

impl CompressionKind {
    /// Classifies a magic-byte prefix (`1F 8B` gzip, `50 4B` zip).
    #[must_use]
    pub fn from_magic(magic: &[u8]) -> Self {
        match magic {
            [0x1f, 0x8b, ..] => Self::Gzip,
            [0x50, 0x4b, ..] => Self::Zip,
            _ => Self::None,
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "uncompressed",
            Self::Gzip => "gzip",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How much decompressed content to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// At most this many bytes from the start.
    Prefix(usize),
    /// Everything.
    Full,
}

/// Seeks back to the start of the source.
pub fn rewind<R: Seek + ?Sized>(source: &mut R) -> Result<()> {
    source.seek(SeekFrom::Start(0))?;
    Ok(())
}

/// Reads the first two bytes and classifies the compression envelope.
///
/// The source is left at offset 0 whether or not the read succeeds.
pub fn detect_compression<R: Read + Seek>(source: &mut R) -> Result<CompressionKind> {
    rewind(source)?;
    let mut magic = [0u8; 2];
    let read = read_up_to(source, &mut magic);
    rewind(source)?;
    let filled = read?;

    let kind = CompressionKind::from_magic(&magic[..filled]);
    tracing::debug!(compression = %kind, "detected compression envelope");
    Ok(kind)
}

/// Decodes the content inside the envelope, then rewinds the source.
pub fn decode<R: Read + Seek>(
    source: &mut R,
    kind: CompressionKind,
    extent: Extent,
) -> Result<Vec<u8>> {
    rewind(source)?;
    let decoded = match kind {
        CompressionKind::None => read_extent(source, extent)?,
        CompressionKind::Gzip => decode_gzip(source, extent)?,
        CompressionKind::Zip => decode_zip(source, extent)?,
    };
    rewind(source)?;

    tracing::trace!(
        compression = %kind,
        bytes = decoded.len(),
        full = matches!(extent, Extent::Full),
        "decoded content"
    );
    Ok(decoded)
}

fn decode_gzip<R: Read + Seek>(source: &mut R, extent: Extent) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(BufReader::new(&mut *source));
    let decoded = read_extent(&mut decoder, extent)
        .map_err(|e| ParseError::format(format!("corrupt gzip stream: {e}")))?;

    if extent == Extent::Full {
        let mut trailing = Vec::new();
        decoder.into_inner().read_to_end(&mut trailing)?;
        if trailing.starts_with(&GZIP_MAGIC) {
            return Err(ParseError::unsupported(
                CompressionKind::Gzip,
                "stream holds more than one gzip member",
            ));
        }
        // NUL padding after the member is tolerated.
        if trailing.iter().any(|&b| b != 0) {
            return Err(ParseError::format("trailing data after gzip stream"));
        }
        if !trailing.is_empty() {
            tracing::trace!(bytes = trailing.len(), "skipped zero padding after gzip stream");
        }
    }
    Ok(decoded)
}

fn decode_zip<R: Read + Seek>(source: &mut R, extent: Extent) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(&mut *source).map_err(zip_error)?;
    if archive.len() != 1 {
        return Err(ParseError::unsupported(
            CompressionKind::Zip,
            format!("archive holds {} entries, expected exactly 1", archive.len()),
        ));
    }

    let mut entry = archive.by_index(0).map_err(zip_error)?;
    if entry.is_dir() {
        return Err(ParseError::unsupported(
            CompressionKind::Zip,
            format!("sole archive entry '{}' is a directory", entry.name()),
        ));
    }
    tracing::debug!(entry = entry.name(), "reading zip entry");

    read_extent(&mut entry, extent)
        .map_err(|e| ParseError::format(format!("corrupt zip entry: {e}")))
}

fn zip_error(err: ZipError) -> ParseError {
    match err {
        ZipError::Io(e) => ParseError::Io(e),
        err @ ZipError::UnsupportedArchive(_) => {
            ParseError::unsupported(CompressionKind::Zip, err.to_string())
        }
        err => ParseError::format(format!("invalid zip archive: {err}")),
    }
}

fn read_extent<R: Read + ?Sized>(reader: &mut R, extent: Extent) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    match extent {
        Extent::Prefix(limit) => {
            reader.take(limit as u64).read_to_end(&mut buf)?;
        }
        Extent::Full => {
            reader.read_to_end(&mut buf)?;
        }
    }
    Ok(buf)
}

/// Fills as much of `buf` as the source allows, returning the count.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
