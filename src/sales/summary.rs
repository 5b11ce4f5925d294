//! Summary Calculator
//!
//! Headline statistics over a run of monthly records.

use serde::Serialize;

use super::error::{SalesError, SalesResult};
use super::types::SalesRecord;

/// Scalars shown in the dashboard's metric row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    /// Sum of units sold
    pub total: u64,
    /// `total / count`, truncated
    pub average: u64,
    /// Highest monthly value
    pub max: u32,
    /// Lowest monthly value
    pub min: u32,
}

/// Compute summary statistics.
///
/// Does not touch its input; calling it twice yields equal results.
pub fn summarize(records: &[SalesRecord]) -> SalesResult<SummaryStats> {
    let best = best_month(records).ok_or(SalesError::EmptyDataset)?;
    let worst = worst_month(records).ok_or(SalesError::EmptyDataset)?;

    let total: u64 = records.iter().map(|r| u64::from(r.units_sold)).sum();
    let average = total / records.len() as u64;

    Ok(SummaryStats {
        total,
        average,
        max: best.units_sold,
        min: worst.units_sold,
    })
}

/// Record with the highest units sold; ties go to the earliest month
pub fn best_month(records: &[SalesRecord]) -> Option<SalesRecord> {
    first_extreme(records, |candidate, current| candidate > current)
}

/// Record with the lowest units sold; ties go to the earliest month
pub fn worst_month(records: &[SalesRecord]) -> Option<SalesRecord> {
    first_extreme(records, |candidate, current| candidate < current)
}

/// Only a strictly better value replaces the current pick, which keeps the
/// first occurrence on ties.
fn first_extreme(
    records: &[SalesRecord],
    better: impl Fn(u32, u32) -> bool,
) -> Option<SalesRecord> {
    let (first, rest) = records.split_first()?;

    let pick = rest.iter().fold(first, |current, candidate| {
        if better(candidate.units_sold, current.units_sold) {
            candidate
        } else {
            current
        }
    });

    Some(*pick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::dataset::chicken_sales_2024;
    use chrono::Month;

    fn records(values: &[u32]) -> Vec<SalesRecord> {
        crate::locale::MONTHS
            .iter()
            .zip(values)
            .map(|(&m, &v)| SalesRecord::new(m, v))
            .collect()
    }

    #[test]
    fn test_summarize_builtin_dataset() {
        let series = chicken_sales_2024();
        let stats = summarize(series.records()).unwrap();

        assert_eq!(
            stats,
            SummaryStats {
                total: 8260,
                average: 688,
                max: 950,
                min: 450,
            }
        );
    }

    #[test]
    fn test_summarize_is_pure() {
        let series = chicken_sales_2024();
        let before = series.clone();

        let first = summarize(series.records()).unwrap();
        let second = summarize(series.records()).unwrap();

        assert_eq!(first, second);
        assert_eq!(series, before);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(matches!(summarize(&[]), Err(SalesError::EmptyDataset)));
    }

    #[test]
    fn test_average_truncates() {
        let stats = summarize(&records(&[1, 2])).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average, 1);
    }

    #[test]
    fn test_best_and_worst_builtin() {
        let series = chicken_sales_2024();
        assert_eq!(
            best_month(series.records()),
            Some(SalesRecord::new(Month::July, 950))
        );
        assert_eq!(
            worst_month(series.records()),
            Some(SalesRecord::new(Month::January, 450))
        );
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let data = records(&[300, 900, 100, 900, 100]);

        assert_eq!(best_month(&data).map(|r| r.month), Some(Month::February));
        assert_eq!(worst_month(&data).map(|r| r.month), Some(Month::March));
    }

    #[test]
    fn test_single_record() {
        let data = records(&[42]);
        let stats = summarize(&data).unwrap();
        assert_eq!((stats.max, stats.min, stats.average), (42, 42, 42));
    }

    #[test]
    fn test_total_does_not_overflow_u32() {
        let data = records(&[u32::MAX, u32::MAX]);
        let stats = summarize(&data).unwrap();
        assert_eq!(stats.total, 2 * u64::from(u32::MAX));
        assert_eq!(stats.average, u64::from(u32::MAX));
    }
}
