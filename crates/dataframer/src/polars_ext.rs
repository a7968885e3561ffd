//! Conversion of parsed tables into Polars DataFrames.

use polars::prelude::{Column as PolarsColumn, DataFrame, NamedFrom, Series};

use crate::error::Result;
use crate::table::{ColumnData, Table};

/// Column name used for row keys when the table has no index name.
pub const DEFAULT_INDEX_NAME: &str = "index";

impl Table {
    /// Builds a DataFrame with the row keys as the first column.
    ///
    /// Numeric columns become `Float64` and text columns `String`; empty
    /// cells are nulls. The key column is suffixed `.1`, `.2`, ... when its
    /// name is taken by a data column.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let index_name = self.key_column_name();
        let keys: Vec<String> = self.row_keys().iter().map(ToString::to_string).collect();

        let mut columns: Vec<PolarsColumn> = Vec::with_capacity(self.width() + 1);
        columns.push(Series::new(index_name.as_str().into(), keys).into());
        for column in self.columns() {
            let series = match &column.data {
                ColumnData::Numeric(values) => Series::new(column.name.as_str().into(), values),
                ColumnData::Text(values) => Series::new(column.name.as_str().into(), values),
            };
            columns.push(series.into());
        }

        Ok(DataFrame::new(columns)?)
    }

    fn key_column_name(&self) -> String {
        let base = self.index_name().unwrap_or(DEFAULT_INDEX_NAME);
        let taken = |name: &str| self.column(name).is_some();
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|suffix| format!("{base}.{suffix}"))
            .find(|name| !taken(name))
            .unwrap_or_else(|| base.to_string())
    }
}
