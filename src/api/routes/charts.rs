//! Chart Routes
//!
//! - GET /api/v1/charts/:kind - One chart, in the configured renderer's format

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::ChartKind;

/// GET /api/v1/charts/:kind
///
/// Returns `image/svg+xml` or a Plotly figure as `application/json`.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Response> {
    let kind: ChartKind = kind.parse()?;
    let chart = state.dashboard.chart(&state.series, kind)?;

    tracing::debug!(kind = %kind, bytes = chart.body.len(), "Rendered chart");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, chart.format.content_type())],
        chart.body,
    )
        .into_response())
}
