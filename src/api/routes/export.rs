//! Export Routes
//!
//! Download of the growth table for use elsewhere.
//!
//! - GET /api/v1/export?format=csv|json

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{ExportParams, GrowthRow};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::sales::growth_rows;
use crate::api::state::AppState;

/// GET /api/v1/export
///
/// Export records with their growth rates.
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let format = params.format.to_lowercase();
    let rows = growth_rows(&state);

    let (content_type, extension, body) = match format.as_str() {
        "csv" => ("text/csv; charset=utf-8", "csv", format_csv(&rows)?),
        "json" => (
            "application/json",
            "json",
            serde_json::to_string_pretty(&rows)
                .map_err(|e| ApiError::Internal(format!("JSON encoding failed: {}", e)))?,
        ),
        other => {
            return Err(ApiError::Validation(format!(
                "Unsupported export format: {}. Use csv or json",
                other
            )))
        }
    };

    let filename = format!(
        "chicken_sales_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    );

    tracing::info!(format = %format, rows = rows.len(), "Exported sales data");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// CSV with a `month,label,units_sold,growth_rate` header
pub(crate) fn format_csv(rows: &[GrowthRow]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["month", "label", "units_sold", "growth_rate"])
        .map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([
                row.month.to_string(),
                row.label.clone(),
                row.units_sold.to_string(),
                row.growth_rate.to_string(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))
}

fn csv_error(e: csv::Error) -> ApiError {
    ApiError::Internal(format!("CSV encoding failed: {}", e))
}
