//! Sales Routes
//!
//! Read-only endpoints over the served series.
//!
//! - GET /api/v1/sales - Monthly records
//! - GET /api/v1/summary - Summary statistics and best/worst month
//! - GET /api/v1/growth - Month-over-month growth rates

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{GrowthResponse, GrowthRow, SalesResponse, SummaryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/sales
pub async fn list_sales(State(state): State<Arc<AppState>>) -> Json<SalesResponse> {
    Json(SalesResponse::new(&state.series, state.dashboard.locale()))
}

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryResponse>> {
    let summary = SummaryResponse::new(&state.series, state.dashboard.locale())?;
    Ok(Json(summary))
}

/// GET /api/v1/growth
pub async fn get_growth(State(state): State<Arc<AppState>>) -> Json<GrowthResponse> {
    Json(GrowthResponse::new(&state.series, state.dashboard.locale()))
}

/// Records zipped with their growth rates
pub(crate) fn growth_rows(state: &AppState) -> Vec<GrowthRow> {
    GrowthRow::from_series(&state.series, state.dashboard.locale())
}
