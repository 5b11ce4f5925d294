//! Chart rendering
//!
//! The dashboard draws the same monthly series four ways. Every drawing
//! backend implements [`SeriesRenderer`]: it receives a [`ChartSpec`] (the
//! category labels, the values and the titles) plus a [`ChartTheme`], and
//! returns a [`RenderedChart`] the page can embed.
//!
//! Two backends ship with the crate:
//! - [`SvgRenderer`]: inline SVG drawn with plotters, no JavaScript needed
//! - [`PlotlyRenderer`]: a Plotly figure as JSON, drawn by plotly.js in the browser

pub mod plotly;
pub mod svg;
pub mod theme;

pub use plotly::PlotlyRenderer;
pub use svg::SvgRenderer;
pub use theme::ChartTheme;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::locale::Locale;
use crate::sales::SalesSeries;

/// Errors raised while rendering a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// Nothing to draw
    #[error("Cannot render chart with empty data")]
    EmptySeries,

    /// Labels and values must pair up
    #[error("Labels and values must have the same length: {labels} vs {values}")]
    LengthMismatch { labels: usize, values: usize },

    /// Chart kind name not recognized
    #[error("Unknown chart kind: {0}. Use line, bar, area, or combo")]
    UnknownKind(String),

    /// Renderer name not recognized
    #[error("Unknown renderer: {0}. Use svg or plotly")]
    UnknownRenderer(String),

    /// The drawing backend failed
    #[error("Drawing error: {0}")]
    Drawing(String),

    /// Figure serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The four visual encodings of the series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Line with markers
    #[default]
    Line,
    /// Bars colored on a continuous scale
    Bar,
    /// Filled area under the line
    Area,
    /// Bars with a trend line on top
    Combo,
}

impl ChartKind {
    /// All kinds, in tab order
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Line,
            ChartKind::Bar,
            ChartKind::Area,
            ChartKind::Combo,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Area => "area",
            ChartKind::Combo => "combo",
        }
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "area" => Ok(ChartKind::Area),
            "combo" => Ok(ChartKind::Combo),
            other => Err(ChartError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Category axis labels
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    /// Legend name of the bar layer (combo only)
    pub bar_name: String,
    /// Legend name of the line layer (combo only)
    pub line_name: String,
}

impl ChartSpec {
    /// Create an empty spec with a title
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_title: String::new(),
            y_title: String::new(),
            labels: Vec::new(),
            values: Vec::new(),
            bar_name: String::new(),
            line_name: String::new(),
        }
    }

    /// Spec for a sales series with localized titles and month labels
    pub fn from_series(kind: ChartKind, series: &SalesSeries, locale: Locale) -> Self {
        let labels = locale.labels();

        Self::new(kind, labels.chart_title(kind))
            .axis_titles(labels.month_column, labels.units_column)
            .series_names(labels.combo_bar_name, labels.combo_line_name)
            .points(
                series.iter().map(|r| locale.month_label(r.month)).collect(),
                series.values(),
            )
    }

    /// Builder method: set axis titles
    pub fn axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = x.into();
        self.y_title = y.into();
        self
    }

    /// Builder method: set combo legend names
    pub fn series_names(mut self, bar: impl Into<String>, line: impl Into<String>) -> Self {
        self.bar_name = bar.into();
        self.line_name = line.into();
        self
    }

    /// Builder method: set the data points
    pub fn points(mut self, labels: Vec<String>, values: Vec<u32>) -> Self {
        self.labels = labels;
        self.values = values;
        self
    }

    /// Check the spec is drawable
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.labels.len() != self.values.len() {
            return Err(ChartError::LengthMismatch {
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }

        if self.values.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        Ok(())
    }

    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    pub fn min_value(&self) -> u32 {
        self.values.iter().copied().min().unwrap_or(0)
    }
}

/// Output media of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFormat {
    /// `<svg>` markup
    Svg,
    /// Plotly figure (`{"data": [...], "layout": {...}}`)
    PlotlyJson,
}

impl ChartFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "image/svg+xml",
            ChartFormat::PlotlyJson => "application/json",
        }
    }

    /// Backend name as shown in health output
    pub fn name(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::PlotlyJson => "plotly",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::PlotlyJson => "json",
        }
    }
}

/// A chart ready to embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub format: ChartFormat,
    pub body: String,
}

/// A chart drawing backend
pub trait SeriesRenderer: Send + Sync {
    /// Format of the charts this renderer produces
    fn format(&self) -> ChartFormat;

    /// Draw a chart
    fn render(&self, spec: &ChartSpec, theme: &ChartTheme) -> Result<RenderedChart, ChartError>;
}

/// Selectable renderer backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Svg,
    Plotly,
}

impl RendererKind {
    /// Instantiate the backend
    pub fn build(self) -> Arc<dyn SeriesRenderer> {
        match self {
            RendererKind::Svg => Arc::new(SvgRenderer::new()),
            RendererKind::Plotly => Arc::new(PlotlyRenderer::new()),
        }
    }
}

impl FromStr for RendererKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(RendererKind::Svg),
            "plotly" => Ok(RendererKind::Plotly),
            other => Err(ChartError::UnknownRenderer(other.to_string())),
        }
    }
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererKind::Svg => write!(f, "svg"),
            RendererKind::Plotly => write!(f, "plotly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::chicken_sales_2024;

    #[test]
    fn test_parse_chart_kind() {
        assert_eq!("line".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!("COMBO".parse::<ChartKind>().unwrap(), ChartKind::Combo);
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(ChartError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_kind_order_matches_tabs() {
        let names: Vec<&str> = ChartKind::all().iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["line", "bar", "area", "combo"]);
    }

    #[test]
    fn test_spec_from_series() {
        let spec = ChartSpec::from_series(ChartKind::Bar, &chicken_sales_2024(), Locale::Ko);

        assert_eq!(spec.title, "월별 치킨 판매량 비교");
        assert_eq!(spec.x_title, "월");
        assert_eq!(spec.y_title, "판매량(개)");
        assert_eq!(spec.labels.len(), 12);
        assert_eq!(spec.labels[6], "7월");
        assert_eq!(spec.max_value(), 950);
        assert_eq!(spec.min_value(), 450);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_spec_validation() {
        let mismatch = ChartSpec::new(ChartKind::Line, "t").points(vec!["a".into()], vec![]);
        assert!(matches!(
            mismatch.validate(),
            Err(ChartError::LengthMismatch { labels: 1, values: 0 })
        ));

        let empty = ChartSpec::new(ChartKind::Line, "t");
        assert!(matches!(empty.validate(), Err(ChartError::EmptySeries)));
    }

    #[test]
    fn test_renderer_kind_builds_matching_format() {
        assert_eq!(RendererKind::Svg.build().format(), ChartFormat::Svg);
        assert_eq!(RendererKind::Plotly.build().format(), ChartFormat::PlotlyJson);
        assert!("canvas".parse::<RendererKind>().is_err());
    }
}
