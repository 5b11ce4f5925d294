//! Data Transfer Objects
//!
//! Request parameters and response bodies for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::sales::{
    best_month, growth_rates, summarize, worst_month, GrowthRate, SalesRecord, SalesResult,
    SalesSeries, SummaryStats,
};

// ============================================
// REQUEST PARAMS
// ============================================

/// `?tab=` selector for the dashboard
#[derive(Debug, Default, Deserialize)]
pub struct TabParams {
    #[serde(default)]
    pub tab: Option<String>,
}

/// `?format=` selector for export
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// csv or json
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// SALES DTOs
// ============================================

/// One month as the API shows it
#[derive(Debug, Clone, Serialize)]
pub struct RecordDto {
    /// Month number (1-12)
    pub month: u32,
    /// Localized month label
    pub label: String,
    pub units_sold: u32,
}

impl RecordDto {
    pub fn from_record(record: &SalesRecord, locale: Locale) -> Self {
        Self {
            month: record.month_number(),
            label: locale.month_label(record.month),
            units_sold: record.units_sold,
        }
    }
}

/// GET /api/v1/sales
#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub total: usize,
    pub records: Vec<RecordDto>,
}

impl SalesResponse {
    pub fn new(series: &SalesSeries, locale: Locale) -> Self {
        let records: Vec<RecordDto> = series
            .iter()
            .map(|r| RecordDto::from_record(r, locale))
            .collect();

        Self {
            total: records.len(),
            records,
        }
    }
}

/// GET /api/v1/summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub stats: SummaryStats,
    pub best_month: Option<RecordDto>,
    pub worst_month: Option<RecordDto>,
    pub record_count: usize,
}

impl SummaryResponse {
    pub fn new(series: &SalesSeries, locale: Locale) -> SalesResult<Self> {
        let records = series.records();
        let stats = summarize(records)?;

        Ok(Self {
            stats,
            best_month: best_month(records).map(|r| RecordDto::from_record(&r, locale)),
            worst_month: worst_month(records).map(|r| RecordDto::from_record(&r, locale)),
            record_count: records.len(),
        })
    }
}

/// One row of the growth table
#[derive(Debug, Serialize)]
pub struct GrowthRow {
    pub month: u32,
    pub label: String,
    pub units_sold: u32,
    pub growth_rate: GrowthRate,
}

impl GrowthRow {
    /// Records zipped with their growth rates
    pub fn from_series(series: &SalesSeries, locale: Locale) -> Vec<GrowthRow> {
        let records = series.records();

        records
            .iter()
            .zip(growth_rates(records))
            .map(|(record, growth_rate)| GrowthRow {
                month: record.month_number(),
                label: locale.month_label(record.month),
                units_sold: record.units_sold,
                growth_rate,
            })
            .collect()
    }
}

/// GET /api/v1/growth
#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub total: usize,
    pub rows: Vec<GrowthRow>,
}

impl GrowthResponse {
    pub fn new(series: &SalesSeries, locale: Locale) -> Self {
        let rows = GrowthRow::from_series(series, locale);

        Self {
            total: rows.len(),
            rows,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Number of records being served
    pub records: usize,
    /// Chart output format
    pub renderer: String,
    pub locale: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::chicken_sales_2024;

    #[test]
    fn test_summary_response() {
        let summary = SummaryResponse::new(&chicken_sales_2024(), Locale::En).unwrap();

        assert_eq!(summary.stats.total, 8260);
        assert_eq!(summary.record_count, 12);
        assert_eq!(summary.best_month.unwrap().label, "Jul");
        assert_eq!(summary.worst_month.unwrap().label, "Jan");
    }

    #[test]
    fn test_growth_response() {
        let growth = GrowthResponse::new(&chicken_sales_2024(), Locale::Ko);

        assert_eq!(growth.total, 12);
        assert!(growth.rows[0].growth_rate.is_initial());
        assert_eq!(growth.rows[9].label, "10월");
        assert_eq!(growth.rows[9].growth_rate.to_string(), "-19.4%");
    }

    #[test]
    fn test_export_format_defaults_to_csv() {
        let params: ExportParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.format, "csv");
    }
}
