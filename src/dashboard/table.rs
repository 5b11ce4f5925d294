//! Tabular view of the series
//!
//! A `DataTable` is a column-name header plus rows of display strings.
//! Columns are only ever appended; existing ones are never rewritten.

use serde::Serialize;

use super::DashboardError;
use crate::locale::Locale;
use crate::sales::SalesSeries;

/// Display table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Month and units columns, one row per record
    pub fn from_series(series: &SalesSeries, locale: Locale) -> Self {
        let labels = locale.labels();

        Self {
            columns: vec![
                labels.month_column.to_string(),
                labels.units_column.to_string(),
            ],
            rows: series
                .iter()
                .map(|r| vec![locale.month_label(r.month), r.units_sold.to_string()])
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Copy of this table with one more column on the right
    pub fn append_column(
        &self,
        header: impl Into<String>,
        values: Vec<String>,
    ) -> Result<DataTable, DashboardError> {
        if values.len() != self.rows.len() {
            return Err(DashboardError::ColumnLength {
                rows: self.rows.len(),
                values: values.len(),
            });
        }

        let mut columns = self.columns.clone();
        columns.push(header.into());

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.push(value);
                row
            })
            .collect();

        Ok(DataTable { columns, rows })
    }

    /// Values of a column by header name
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == header)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
        )
    }
}
