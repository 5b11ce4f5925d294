//! Plotly Renderer
//!
//! Emits Plotly figures (`{"data": [...], "layout": {...}}`) for plotly.js.
//! The page calls `Plotly.newPlot(el, fig.data, fig.layout)` on the body.

use serde_json::{json, Value};

use super::{ChartError, ChartFormat, ChartKind, ChartSpec, ChartTheme, RenderedChart, SeriesRenderer};

/// plotly.js bundle the HTML page loads when a Plotly chart is present
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Plotly figure backend
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotlyRenderer;

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the figure as a JSON value
    pub fn figure(&self, spec: &ChartSpec, theme: &ChartTheme) -> Result<Value, ChartError> {
        spec.validate()?;

        let data = match spec.kind {
            ChartKind::Line => vec![json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": spec.y_title,
                "x": spec.labels,
                "y": spec.values,
                "line": { "color": theme.primary_color, "width": theme.line_width },
                "marker": { "size": theme.marker_size },
            })],
            ChartKind::Bar => vec![json!({
                "type": "bar",
                "name": spec.y_title,
                "x": spec.labels,
                "y": spec.values,
                "marker": {
                    "color": spec.values,
                    "colorscale": theme.color_scale,
                    "showscale": true,
                    "colorbar": { "title": { "text": spec.y_title } },
                },
            })],
            ChartKind::Area => vec![json!({
                "type": "scatter",
                "mode": "lines",
                "fill": "tozeroy",
                "name": spec.y_title,
                "x": spec.labels,
                "y": spec.values,
                "fillcolor": theme.area_fill,
                "line": { "color": theme.primary_color, "width": theme.area_line_width },
            })],
            ChartKind::Combo => vec![
                json!({
                    "type": "bar",
                    "name": spec.bar_name,
                    "x": spec.labels,
                    "y": spec.values,
                    "marker": { "color": theme.combo_bar_fill },
                }),
                json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": spec.line_name,
                    "x": spec.labels,
                    "y": spec.values,
                    "line": { "color": theme.primary_color, "width": theme.line_width },
                    "marker": { "size": theme.combo_marker_size },
                }),
            ],
        };

        let mut layout = json!({
            "title": { "text": spec.title },
            "hovermode": theme.hover_mode,
            "height": theme.height,
            "paper_bgcolor": theme.background,
            "plot_bgcolor": theme.background,
            "font": { "color": theme.text_color },
            "xaxis": {
                "title": { "text": spec.x_title },
                "gridcolor": theme.grid_color,
            },
            "yaxis": {
                "title": { "text": spec.y_title },
                "gridcolor": theme.grid_color,
                "rangemode": "tozero",
            },
            "showlegend": spec.kind == ChartKind::Combo,
        });

        if spec.kind == ChartKind::Bar {
            layout["xaxis"]["tickangle"] = json!(0);
        }

        Ok(json!({ "data": data, "layout": layout }))
    }
}

impl SeriesRenderer for PlotlyRenderer {
    fn format(&self) -> ChartFormat {
        ChartFormat::PlotlyJson
    }

    fn render(&self, spec: &ChartSpec, theme: &ChartTheme) -> Result<RenderedChart, ChartError> {
        let figure = self.figure(spec, theme)?;

        Ok(RenderedChart {
            kind: spec.kind,
            format: ChartFormat::PlotlyJson,
            body: serde_json::to_string(&figure)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::sales::chicken_sales_2024;

    fn figure(kind: ChartKind) -> Value {
        let spec = ChartSpec::from_series(kind, &chicken_sales_2024(), Locale::Ko);
        PlotlyRenderer::new()
            .figure(&spec, &ChartTheme::default())
            .unwrap()
    }

    #[test]
    fn test_line_figure() {
        let fig = figure(ChartKind::Line);
        let trace = &fig["data"][0];

        assert_eq!(trace["mode"], "lines+markers");
        assert_eq!(trace["line"]["width"], 3.0);
        assert_eq!(trace["line"]["color"], "#FF6B6B");
        assert_eq!(trace["marker"]["size"], 10.0);
        assert_eq!(trace["y"][6], 950);
        assert_eq!(fig["layout"]["hovermode"], "x unified");
        assert_eq!(fig["layout"]["height"], 500);
    }

    #[test]
    fn test_bar_figure_uses_color_scale() {
        let fig = figure(ChartKind::Bar);

        assert_eq!(fig["data"][0]["marker"]["colorscale"], "Reds");
        assert_eq!(fig["layout"]["xaxis"]["tickangle"], 0);
    }

    #[test]
    fn test_area_figure_fills_to_zero() {
        let fig = figure(ChartKind::Area);

        assert_eq!(fig["data"][0]["fill"], "tozeroy");
        assert_eq!(fig["data"][0]["fillcolor"], "rgba(255, 107, 107, 0.4)");
        assert_eq!(fig["data"][0]["line"]["width"], 2.0);
    }

    #[test]
    fn test_combo_figure_has_two_traces() {
        let fig = figure(ChartKind::Combo);
        let data = fig["data"].as_array().unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "bar");
        assert_eq!(data[0]["name"], "판매량");
        assert_eq!(data[1]["name"], "추이선");
        assert_eq!(data[1]["marker"]["size"], 8.0);
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "월");
        assert_eq!(fig["layout"]["showlegend"], true);
    }

    #[test]
    fn test_render_body_is_json() {
        let spec = ChartSpec::from_series(ChartKind::Line, &chicken_sales_2024(), Locale::En);
        let chart = PlotlyRenderer::new()
            .render(&spec, &ChartTheme::default())
            .unwrap();

        assert_eq!(chart.format, ChartFormat::PlotlyJson);
        let parsed: Value = serde_json::from_str(&chart.body).unwrap();
        assert_eq!(parsed["data"][0]["x"][0], "Jan");
    }
}
