//! Delimiter and quoting inference from a text sample.
//!
//! Two passes over the sample lines:
//!
//! 1. **Quotes**: look for fields wrapped in `"` or `'` that sit between
//!    delimiter candidates (or line edges). The character next to quoted
//!    fields is taken as the delimiter if it splits every line into the
//!    same number of fields.
//! 2. **Frequency**: otherwise every candidate is scored by how consistently
//!    it appears the same number of times on every line. Consistency starts
//!    at 1.0 and relaxes in 0.01 steps down to 0.9 until a candidate
//!    qualifies.
//!
//! When several candidates qualify, the first one found in
//! [`PREFERRED_DELIMITERS`] wins, then the highest `(mode, agreement)`
//! score. No default delimiter is ever assumed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

/// Delimiters chosen first when more than one candidate is consistent.
pub const PREFERRED_DELIMITERS: [u8; 5] = [b',', b'\t', b';', b' ', b':'];

const QUOTE_CHARS: [u8; 2] = [b'"', b'\''];

/// Consistency thresholds, in percent, tried from strictest to loosest.
const CONSISTENCY_PERCENT: std::ops::RangeInclusive<u32> = 90..=100;

/// Loosest share of lines that must agree on a delimiter count.
const MIN_CONSISTENCY: f64 = 0.9;

/// Quoting convention of a delimited table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quoting {
    /// Quote characters are ordinary data.
    None,
    /// Fields may be wrapped in this character; doubled inside to escape.
    Char(u8),
}

/// Lexical conventions needed to tokenize a delimited table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: Quoting,
}

impl Dialect {
    /// Creates a dialect with standard double-quote quoting.
    #[must_use]
    pub const fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            quote: Quoting::Char(b'"'),
        }
    }

    /// Fixed layout of GCT bodies: tab-delimited, unquoted.
    #[must_use]
    pub const fn gct() -> Self {
        Self {
            delimiter: b'\t',
            quote: Quoting::None,
        }
    }

    /// Returns the delimiter as a character.
    #[must_use]
    pub const fn delimiter_char(&self) -> char {
        self.delimiter as char
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quote {
            Quoting::None => write!(f, "{:?} unquoted", self.delimiter_char()),
            Quoting::Char(q) => write!(f, "{:?} quoted by {:?}", self.delimiter_char(), q as char),
        }
    }
}

/// Returns true if `byte` may act as a delimiter.
///
/// Word characters, quotes and line terminators never delimit; every other
/// printable ASCII character, tab and space may.
pub fn is_delimiter_candidate(byte: u8) -> bool {
    match byte {
        b'\t' | b' ' => true,
        b'\n' | b'\r' | b'_' => false,
        b if QUOTE_CHARS.contains(&b) => false,
        b => b.is_ascii_punctuation(),
    }
}

/// Infers the dialect of a delimited sample.
pub fn sniff_dialect(sample: &str) -> Result<Dialect> {
    let lines: Vec<&[u8]> = sample
        .lines()
        .map(str::as_bytes)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(ParseError::Dialect {
            reason: "sample is empty".to_string(),
        });
    }

    let quotes = guess_quote_and_delimiter(&lines);
    let quote = quotes.map_or(b'"', |q| q.quote);

    let delimiter = match quotes.and_then(|q| q.delimiter) {
        Some(delimiter) if quoted_delimiter_is_consistent(&lines, delimiter, quote) => delimiter,
        _ => guess_delimiter(&lines)?,
    };

    let dialect = Dialect {
        delimiter,
        quote: Quoting::Char(quote),
    };
    tracing::debug!(dialect = %dialect, lines = lines.len(), "inferred dialect");
    Ok(dialect)
}

#[derive(Debug, Clone, Copy)]
struct QuoteGuess {
    quote: u8,
    delimiter: Option<u8>,
}

/// Finds the quote character used most for whole fields, with the delimiter
/// seen most often next to those fields.
fn guess_quote_and_delimiter(lines: &[&[u8]]) -> Option<QuoteGuess> {
    let mut best: Option<(usize, QuoteGuess)> = None;

    for quote in QUOTE_CHARS {
        let mut fields = 0usize;
        let mut neighbours: BTreeMap<u8, usize> = BTreeMap::new();
        for line in lines {
            for delimiter in quoted_field_delimiters(line, quote) {
                fields += 1;
                if let Some(d) = delimiter {
                    *neighbours.entry(d).or_default() += 1;
                }
            }
        }
        if fields == 0 {
            continue;
        }

        let delimiter = neighbours
            .iter()
            .fold(None::<(u8, usize)>, |acc, (&d, &n)| match acc {
                Some((_, best_n)) if best_n >= n => acc,
                _ => Some((d, n)),
            })
            .map(|(d, _)| d);
        let guess = QuoteGuess { quote, delimiter };
        if best.is_none_or(|(best_fields, _)| fields > best_fields) {
            best = Some((fields, guess));
        }
    }

    best.map(|(_, guess)| guess)
}

/// Scans one line for fields wrapped in `quote`.
///
/// Yields one entry per quoted field, holding the delimiter that bounds it
/// (`None` when the field spans the whole line).
fn quoted_field_delimiters(line: &[u8], quote: u8) -> Vec<Option<u8>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let opens_field = line[pos] == quote && (pos == 0 || is_delimiter_candidate(line[pos - 1]));
        if !opens_field {
            pos += 1;
            continue;
        }
        let before = pos.checked_sub(1).map(|p| line[p]);

        // Find the closing quote, skipping doubled quotes.
        let mut end = pos + 1;
        let mut closed = None;
        while end < line.len() {
            if line[end] == quote {
                if line.get(end + 1) == Some(&quote) {
                    end += 2;
                    continue;
                }
                closed = Some(end);
                break;
            }
            end += 1;
        }
        let Some(close) = closed else {
            break;
        };

        let after = line.get(close + 1).copied();
        let bounded = match (before, after) {
            (Some(b), Some(a)) => is_delimiter_candidate(a) && (a == b),
            (None, Some(a)) => is_delimiter_candidate(a),
            (_, None) => true,
        };
        if bounded {
            found.push(before.or(after));
        }
        pos = close + 1;
    }

    found
}

/// Checks that `delimiter` splits lines into a consistent number of fields
/// once quoted fields are skipped.
fn quoted_delimiter_is_consistent(lines: &[&[u8]], delimiter: u8, quote: u8) -> bool {
    let counts = lines
        .iter()
        .map(|line| count_unquoted(line, delimiter, quote));
    mode_of(counts, lines.len()).is_some_and(|mode| mode.qualifies(lines.len(), MIN_CONSISTENCY))
}

/// Counts `delimiter` outside fields wrapped in `quote`.
fn count_unquoted(line: &[u8], delimiter: u8, quote: u8) -> usize {
    let mut count = 0;
    let mut field_start = true;
    let mut in_quotes = false;
    let mut bytes = line.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if in_quotes {
            if b == quote {
                if bytes.peek() == Some(&quote) {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
        } else if b == delimiter {
            count += 1;
            field_start = true;
            continue;
        } else if b == quote && field_start {
            in_quotes = true;
        }
        field_start = false;
    }

    count
}

/// Per-character count profile across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mode {
    /// Most common per-line count.
    count: usize,
    /// Lines with the mode count minus lines with any other count.
    agreement: isize,
}

impl Mode {
    fn qualifies(&self, lines: usize, consistency: f64) -> bool {
        self.count > 0 && self.agreement > 0 && self.agreement as f64 / lines as f64 >= consistency
    }
}

fn guess_delimiter(lines: &[&[u8]]) -> Result<u8> {
    let modes = candidate_modes(lines);

    let mut qualified: Vec<(u8, Mode)> = Vec::new();
    for percent in CONSISTENCY_PERCENT.rev() {
        let consistency = f64::from(percent) / 100.0;
        qualified = modes
            .iter()
            .filter(|(_, mode)| mode.qualifies(lines.len(), consistency))
            .map(|(&c, &mode)| (c, mode))
            .collect();
        if !qualified.is_empty() {
            break;
        }
    }

    if let [(only, _)] = qualified.as_slice() {
        return Ok(*only);
    }
    if let Some(&preferred) = PREFERRED_DELIMITERS
        .iter()
        .find(|d| qualified.iter().any(|(c, _)| c == *d))
    {
        return Ok(preferred);
    }
    qualified
        .iter()
        .fold(None::<(u8, Mode)>, |acc, &(c, mode)| match acc {
            Some((_, best)) if (best.count, best.agreement) >= (mode.count, mode.agreement) => acc,
            _ => Some((c, mode)),
        })
        .map(|(c, _)| c)
        .ok_or_else(|| ParseError::Dialect {
            reason: "no character appears consistently on every line".to_string(),
        })
}

fn candidate_modes(lines: &[&[u8]]) -> BTreeMap<u8, Mode> {
    let mut modes = BTreeMap::new();

    for candidate in (0u8..128).filter(|&b| is_delimiter_candidate(b)) {
        let counts = lines
            .iter()
            .map(|line| line.iter().filter(|&&b| b == candidate).count());
        if let Some(mode) = mode_of(counts, lines.len()) {
            modes.insert(candidate, mode);
        }
    }

    modes
}

/// Most common per-line count, or `None` when the character never appears.
fn mode_of(counts: impl Iterator<Item = usize>, lines: usize) -> Option<Mode> {
    // Kept in first-seen order so ties pick the earliest.
    let mut frequencies: Vec<(usize, usize)> = Vec::new();
    for count in counts {
        match frequencies.iter_mut().find(|(c, _)| *c == count) {
            Some((_, seen)) => *seen += 1,
            None => frequencies.push((count, 1)),
        }
    }
    if frequencies.iter().all(|&(count, _)| count == 0) {
        return None;
    }

    let (count, mode_lines) = frequencies
        .iter()
        .copied()
        .fold((0, 0), |best, (count, seen)| if seen > best.1 { (count, seen) } else { best });
    let others = lines - mode_lines;
    Some(Mode {
        count,
        agreement: mode_lines as isize - others as isize,
    })
}
