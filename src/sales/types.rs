//! Core data types for monthly sales
//!
//! - `SalesRecord`: units sold in one calendar month
//! - `SalesSeries`: a validated, ordered, non-empty run of records

use chrono::Month;
use serde::Serialize;

use super::error::{SalesError, SalesResult};

/// Units sold in a single calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesRecord {
    /// Calendar month, serialized as its number (1-12)
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
    /// Units sold during the month
    pub units_sold: u32,
}

impl SalesRecord {
    pub fn new(month: Month, units_sold: u32) -> Self {
        Self { month, units_sold }
    }

    /// 1-based month number
    pub fn month_number(&self) -> u32 {
        self.month.number_from_month()
    }
}

fn serialize_month<S: serde::Serializer>(month: &Month, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u32(month.number_from_month())
}

/// Ordered sequence of monthly records.
///
/// Never empty, months strictly increase in calendar order. Immutable once
/// built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SalesSeries {
    records: Vec<SalesRecord>,
}

impl SalesSeries {
    /// Build a series, validating order and non-emptiness
    pub fn new(records: Vec<SalesRecord>) -> SalesResult<Self> {
        if records.is_empty() {
            return Err(SalesError::EmptyDataset);
        }

        for pair in records.windows(2) {
            if pair[1].month_number() <= pair[0].month_number() {
                return Err(SalesError::OutOfOrder {
                    month: pair[1].month.name().to_string(),
                });
            }
        }

        Ok(Self { records })
    }

    /// Build a full-year series from twelve values, January first
    pub(crate) fn calendar_year(values: [u32; 12]) -> Self {
        let records = crate::locale::MONTHS
            .iter()
            .zip(values)
            .map(|(&month, units)| SalesRecord::new(month, units))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Units sold, in series order
    pub fn values(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.units_sold).collect()
    }
}

impl AsRef<[SalesRecord]> for SalesSeries {
    fn as_ref(&self) -> &[SalesRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a SalesSeries {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rejects_empty() {
        assert!(matches!(
            SalesSeries::new(Vec::new()),
            Err(SalesError::EmptyDataset)
        ));
    }

    #[test]
    fn test_series_rejects_out_of_order() {
        let records = vec![
            SalesRecord::new(Month::March, 10),
            SalesRecord::new(Month::February, 20),
        ];
        let err = SalesSeries::new(records).unwrap_err();
        assert!(matches!(err, SalesError::OutOfOrder { ref month } if month == "February"));
    }

    #[test]
    fn test_series_rejects_duplicate_month() {
        let records = vec![
            SalesRecord::new(Month::May, 10),
            SalesRecord::new(Month::May, 20),
        ];
        assert!(SalesSeries::new(records).is_err());
    }

    #[test]
    fn test_partial_year_is_allowed() {
        let records = vec![
            SalesRecord::new(Month::January, 10),
            SalesRecord::new(Month::June, 20),
        ];
        let series = SalesSeries::new(records).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), vec![10, 20]);
    }

    #[test]
    fn test_record_serializes_month_number() {
        let json = serde_json::to_value(SalesRecord::new(Month::July, 950)).unwrap();
        assert_eq!(json["month"], 7);
        assert_eq!(json["units_sold"], 950);
    }
}
