//! Dataset Provider
//!
//! The built-in 2024 chicken sales figures, plus a CSV loader for running
//! the dashboard against another year.
//!
//! CSV layout: a header row followed by `month,units_sold` rows. The month
//! cell accepts anything `locale::parse_month` understands.

use std::io::Read;
use std::path::Path;

use super::error::{SalesError, SalesResult};
use super::types::{SalesRecord, SalesSeries};
use crate::locale::parse_month;

/// Monthly units sold in 2024, January through December
pub const CHICKEN_SALES_2024: [u32; 12] = [450, 520, 480, 650, 720, 800, 950, 890, 720, 580, 650, 850];

/// The fixed 12-month dataset
pub fn chicken_sales_2024() -> SalesSeries {
    SalesSeries::calendar_year(CHICKEN_SALES_2024)
}

/// Load a series from a CSV file
pub fn load_csv(path: &Path) -> SalesResult<SalesSeries> {
    let file = std::fs::File::open(path)?;
    let series = from_csv_reader(file)?;

    tracing::info!(path = ?path, records = series.len(), "Loaded sales dataset");
    Ok(series)
}

/// Parse a series from any CSV source
pub fn from_csv_reader<R: Read>(reader: R) -> SalesResult<SalesSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        // header is line 1
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        let month_cell = row.get(0).unwrap_or_default();
        let units_cell = row.get(1).unwrap_or_default();

        let month = parse_month(month_cell).ok_or_else(|| SalesError::InvalidMonth {
            line,
            value: month_cell.to_string(),
        })?;

        let units_sold = units_cell
            .parse::<u32>()
            .map_err(|_| SalesError::InvalidUnits {
                line,
                value: units_cell.to_string(),
            })?;

        records.push(SalesRecord::new(month, units_sold));
    }

    SalesSeries::new(records)
}

/// Load the configured dataset, or fall back to the built-in one
pub fn load_or_default(path: Option<&Path>) -> SalesResult<SalesSeries> {
    match path {
        Some(path) => load_csv(path),
        None => {
            tracing::debug!("Using built-in 2024 sales dataset");
            Ok(chicken_sales_2024())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::io::Write;

    #[test]
    fn test_builtin_dataset_shape() {
        let series = chicken_sales_2024();
        assert_eq!(series.len(), 12);
        assert_eq!(series.records()[0].month, Month::January);
        assert_eq!(series.records()[11].month, Month::December);
        assert_eq!(series.values(), CHICKEN_SALES_2024.to_vec());
    }

    #[test]
    fn test_builtin_dataset_is_constant() {
        assert_eq!(chicken_sales_2024(), chicken_sales_2024());
    }

    #[test]
    fn test_from_csv_reader_mixed_month_forms() {
        let data = "month,units_sold\n1월,100\n2,120\nMarch,90\n";
        let series = from_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.records()[2], SalesRecord::new(Month::March, 90));
    }

    #[test]
    fn test_from_csv_reader_header_only() {
        let data = "month,units_sold\n";
        assert!(matches!(
            from_csv_reader(data.as_bytes()),
            Err(SalesError::EmptyDataset)
        ));
    }

    #[test]
    fn test_from_csv_reader_bad_month() {
        let data = "month,units_sold\n1월,100\n13월,120\n";
        let err = from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SalesError::InvalidMonth { line: 3, .. }));
    }

    #[test]
    fn test_from_csv_reader_negative_units() {
        let data = "month,units_sold\n1,-5\n";
        let err = from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SalesError::InvalidUnits { ref value, .. } if value == "-5"));
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "month,units_sold").unwrap();
        writeln!(file, "Jan,10").unwrap();
        writeln!(file, "Feb,0").unwrap();
        file.flush().unwrap();

        let series = load_csv(file.path()).unwrap();
        assert_eq!(series.values(), vec![10, 0]);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let series = load_or_default(None).unwrap();
        assert_eq!(series, chicken_sales_2024());
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, SalesError::Io(_)));
    }
}
