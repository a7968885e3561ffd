//! Per-column type inference: buffered raw cells, then uniform coercion.

use crate::table::ColumnData;

/// Parses a cell as a plain decimal number.
///
/// Accepts integers, decimals and exponents with an optional sign. Words such
/// as `inf` or `NaN` stay text; so do grouped digits like `1,000`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let plain = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !plain {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Coerces a buffered column of raw cells.
///
/// The column is numeric if every non-blank cell parses as a number; a column
/// with no non-blank cells is numeric as well. Otherwise it is text, with
/// blank cells as `None`.
pub fn infer_column(raw: Vec<String>) -> ColumnData {
    let numeric: Option<Vec<Option<f64>>> = raw
        .iter()
        .map(|cell| {
            if is_blank(cell) {
                Some(None)
            } else {
                parse_number(cell).map(Some)
            }
        })
        .collect();

    match numeric {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(
            raw.into_iter()
                .map(|cell| (!is_blank(&cell)).then_some(cell))
                .collect(),
        ),
    }
}
