//! Dashboard Routes
//!
//! Every request is one render of the dashboard; a tab switch is just
//! another request with a different `?tab=`.
//!
//! - GET / - HTML dashboard page
//! - GET /api/v1/dashboard - The same view as JSON

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::api::dto::TabParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::ChartKind;
use crate::dashboard::{html::render_page, DashboardView};

/// GET /
///
/// Render the dashboard page.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> ApiResult<Html<String>> {
    let view = render_view(&state, &params)?;
    Ok(Html(render_page(&view)))
}

/// GET /api/v1/dashboard
///
/// The dashboard view model as JSON.
pub async fn dashboard_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> ApiResult<Json<DashboardView>> {
    Ok(Json(render_view(&state, &params)?))
}

fn render_view(state: &AppState, params: &TabParams) -> ApiResult<DashboardView> {
    let tab = parse_tab(params.tab.as_deref())?;

    tracing::debug!(tab = %tab, "Rendering dashboard");

    Ok(state.dashboard.render(&state.series, tab)?)
}

/// Parse the `tab` query value; missing means the first tab
pub(crate) fn parse_tab(tab: Option<&str>) -> ApiResult<ChartKind> {
    match tab {
        None | Some("") => Ok(ChartKind::default()),
        Some(s) => Ok(s.parse()?),
    }
}
