//! Header row parsing and column-name normalization.

use std::collections::HashSet;

/// Result of header analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    /// Header text of the row-key column, if one is used and named.
    pub index_name: Option<String>,
    /// Unique data column names, in input order.
    pub columns: Vec<String>,
}

impl Headers {
    /// Builds headers from the raw header record.
    ///
    /// With `index_column`, the first field names the row keys and the rest
    /// name data columns. Empty data-column names become `Unnamed: {i}` and
    /// duplicates get `.1`, `.2`, ... suffixes.
    pub fn from_record(fields: &[String], index_column: bool) -> Self {
        let (index_name, data) = match fields.split_first() {
            Some((first, rest)) if index_column => {
                let name = normalize_header(first);
                ((!name.is_empty()).then_some(name), rest)
            }
            _ => (None, fields),
        };
        let offset = fields.len() - data.len();

        let names = data
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let name = normalize_header(raw);
                if name.is_empty() {
                    format!("Unnamed: {}", i + offset)
                } else {
                    name
                }
            })
            .collect();

        Self {
            index_name,
            columns: dedupe_names(names),
        }
    }

    /// Returns the number of data columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no data columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Makes names unique by suffixing repeats with `.1`, `.2`, ...
fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = names.iter().cloned().collect();
    let mut used: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if used.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{name}.{suffix}");
            if !seen.contains(&candidate) && !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        seen.insert(renamed.clone());
        used.insert(renamed.clone());
        out.push(renamed);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_index_column() {
        let headers = Headers::from_record(&fields(&["", "b", "c"]), true);
        assert_eq!(headers.index_name, None);
        assert_eq!(headers.columns, vec!["b", "c"]);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_named_index_column() {
        let headers = Headers::from_record(&fields(&["gene", "s1"]), true);
        assert_eq!(headers.index_name.as_deref(), Some("gene"));
        assert_eq!(headers.columns, vec!["s1"]);
    }

    #[test]
    fn test_no_index_column() {
        let headers = Headers::from_record(&fields(&["a", "b", "c"]), false);
        assert_eq!(headers.index_name, None);
        assert_eq!(headers.columns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unnamed_columns() {
        let headers = Headers::from_record(&fields(&["", "b", " "]), false);
        assert_eq!(headers.columns, vec!["Unnamed: 0", "b", "Unnamed: 2"]);

        let indexed = Headers::from_record(&fields(&["id", "", "c"]), true);
        assert_eq!(indexed.columns, vec!["Unnamed: 1", "c"]);
    }

    #[test]
    fn test_duplicate_names() {
        let headers = Headers::from_record(&fields(&["x", "x", "x.1", "x"]), false);
        assert_eq!(headers.columns, vec!["x", "x.2", "x.1", "x.3"]);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  hello  "), "hello");
        assert_eq!(normalize_header("hello"), "hello");
    }

    #[test]
    fn test_empty_record() {
        let headers = Headers::from_record(&[], true);
        assert!(headers.is_empty());
        assert_eq!(headers.index_name, None);
    }
}
