//! Dashboard view model
//!
//! [`Dashboard::render`] turns a sales series into a [`DashboardView`]: the
//! metric row, the four chart tabs, the data and growth tables and the
//! best/worst month callouts. It is a pure function of its inputs; the host
//! (HTTP server or CLI) calls it again for every interaction, such as a tab
//! switch, and nothing carries over between calls.
//!
//! [`html::render_page`] writes the view as a standalone HTML document.

pub mod format;
pub mod html;
pub mod table;

pub use table::DataTable;

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::chart::{
    ChartError, ChartKind, ChartSpec, ChartTheme, RenderedChart, RendererKind, SeriesRenderer,
};
use crate::config::DashboardConfig;
use crate::locale::Locale;
use crate::sales::{best_month, growth_rates, summarize, worst_month, SalesError, SalesSeries};

/// Errors raised while assembling the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Sales(#[from] SalesError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Appended column must have one value per row
    #[error("Column has {values} values but the table has {rows} rows")]
    ColumnLength { rows: usize, values: usize },
}

/// One tile of the summary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: u64,
    /// Grouped value with unit, e.g. `"8,260개"`
    pub display: String,
}

/// One chart tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTab {
    pub kind: ChartKind,
    pub label: String,
    /// Info banner shown under the chart
    pub caption: String,
    pub chart: RenderedChart,
}

/// Banner style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Info,
    Success,
    Warning,
}

/// Highlighted message box
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callout {
    pub kind: CalloutKind,
    pub message: String,
}

/// Everything the page shows, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub locale: Locale,
    pub page_title: String,
    pub title: String,
    pub metrics: Vec<MetricTile>,
    pub tabs: Vec<ChartTab>,
    pub active_tab: ChartKind,
    pub data_heading: String,
    pub data_table: DataTable,
    pub growth_heading: String,
    pub growth_table: DataTable,
    pub insights_heading: String,
    pub insights: Vec<Callout>,
}

impl DashboardView {
    /// The tab currently selected
    pub fn active(&self) -> Option<&ChartTab> {
        self.tabs.iter().find(|t| t.kind == self.active_tab)
    }
}

/// Dashboard renderer: a chart backend, a theme and a locale
#[derive(Clone)]
pub struct Dashboard {
    renderer: Arc<dyn SeriesRenderer>,
    theme: ChartTheme,
    locale: Locale,
}

impl Dashboard {
    pub fn new(renderer: Arc<dyn SeriesRenderer>, locale: Locale) -> Self {
        Self {
            renderer,
            theme: ChartTheme::default(),
            locale,
        }
    }

    /// Builder method: set the chart theme
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Build from the `[dashboard]` config section
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.renderer.build(), config.locale)
            .with_theme(ChartTheme::default().with_height(config.chart_height))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn renderer(&self) -> &Arc<dyn SeriesRenderer> {
        &self.renderer
    }

    /// Render a single chart of the series
    pub fn chart(&self, series: &SalesSeries, kind: ChartKind) -> Result<RenderedChart, ChartError> {
        let spec = ChartSpec::from_series(kind, series, self.locale);
        self.renderer.render(&spec, &self.theme)
    }

    /// Growth-rate strings in table form, with the localized sentinel
    pub fn growth_column(&self, series: &SalesSeries) -> Vec<String> {
        let initial = self.locale.labels().initial;
        growth_rates(series.records())
            .iter()
            .map(|rate| rate.display_with(initial))
            .collect()
    }

    /// Build the full view
    pub fn render(
        &self,
        series: &SalesSeries,
        active_tab: ChartKind,
    ) -> Result<DashboardView, DashboardError> {
        let labels = self.locale.labels();
        let records = series.records();

        let stats = summarize(records)?;
        let metrics = [
            (labels.metric_total, stats.total),
            (labels.metric_average, stats.average),
            (labels.metric_max, u64::from(stats.max)),
            (labels.metric_min, u64::from(stats.min)),
        ]
        .into_iter()
        .map(|(label, value)| MetricTile {
            label: label.to_string(),
            value,
            display: format::units(value, labels),
        })
        .collect();

        let tabs = ChartKind::all()
            .iter()
            .map(|&kind| -> Result<ChartTab, DashboardError> {
                Ok(ChartTab {
                    kind,
                    label: labels.tab_label(kind).to_string(),
                    caption: labels.caption(kind).to_string(),
                    chart: self.chart(series, kind)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let data_table = DataTable::from_series(series, self.locale);
        let growth_table =
            data_table.append_column(labels.growth_column, self.growth_column(series))?;

        let mut insights = Vec::with_capacity(2);
        if let Some(best) = best_month(records) {
            insights.push(Callout {
                kind: CalloutKind::Success,
                message: format!(
                    "{}: {} ({})",
                    labels.best_month,
                    self.locale.month_label(best.month),
                    format::units(u64::from(best.units_sold), labels)
                ),
            });
        }
        if let Some(worst) = worst_month(records) {
            insights.push(Callout {
                kind: CalloutKind::Warning,
                message: format!(
                    "{}: {} ({})",
                    labels.worst_month,
                    self.locale.month_label(worst.month),
                    format::units(u64::from(worst.units_sold), labels)
                ),
            });
        }

        tracing::debug!(
            tab = %active_tab,
            records = records.len(),
            format = ?self.renderer.format(),
            "Rendered dashboard"
        );

        Ok(DashboardView {
            locale: self.locale,
            page_title: labels.page_title.to_string(),
            title: labels.title.to_string(),
            metrics,
            tabs,
            active_tab,
            data_heading: labels.data_heading.to_string(),
            data_table,
            growth_heading: labels.growth_heading.to_string(),
            growth_table,
            insights_heading: labels.insights_heading.to_string(),
            insights,
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(RendererKind::default().build(), Locale::default())
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("format", &self.renderer.format())
            .field("locale", &self.locale)
            .field("height", &self.theme.height)
            .finish()
    }
}
