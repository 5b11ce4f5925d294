//! HTML page writer
//!
//! Produces a standalone document from a [`DashboardView`]. Tabs are plain
//! links (`?tab=bar`), so every tab switch is a fresh request that
//! re-renders the view on the server.

use super::{Callout, CalloutKind, DashboardView, DataTable};
use crate::chart::plotly::PLOTLY_JS_URL;
use crate::chart::{ChartFormat, RenderedChart};
use crate::markup::escape_xml as escape;

const STYLE: &str = r#"
body { margin: 0; font-family: "Source Sans Pro", system-ui, -apple-system, sans-serif; color: #31333f; background: #ffffff; }
main { max-width: 1200px; margin: 0 auto; padding: 2rem 1.5rem 4rem; }
h1 { font-size: 2.2rem; margin: 0 0 1.5rem; }
h2 { font-size: 1.4rem; margin: 1.5rem 0 0.75rem; }
hr { border: none; border-top: 1px solid #e6e9ef; margin: 2rem 0; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.metric-label { font-size: 0.9rem; color: #6b7280; }
.metric-value { font-size: 2rem; margin-top: 0.25rem; }
.tabs { display: flex; gap: 1.5rem; border-bottom: 1px solid #e6e9ef; margin-bottom: 1rem; }
.tabs a { padding: 0.5rem 0; color: #31333f; text-decoration: none; border-bottom: 2px solid transparent; }
.tabs a.active { color: #ff4b4b; border-bottom-color: #ff4b4b; }
.chart { width: 100%; }
.chart svg { width: 100%; height: auto; }
table { border-collapse: collapse; width: 100%; font-size: 0.95rem; }
th, td { border: 1px solid #e6e9ef; padding: 0.4rem 0.75rem; text-align: left; }
th { background: #f7f8fa; font-weight: 600; }
td.index { color: #9ca3af; width: 3rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.callout { padding: 1rem; border-radius: 0.5rem; margin: 0.75rem 0; }
.callout-info { background: #e8f0fe; color: #1c4ea3; }
.callout-success { background: #e6f4ea; color: #1e6b35; }
.callout-warning { background: #fff8e1; color: #8a6100; }
"#;

/// Render the complete HTML document
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(64 * 1024);
    let needs_plotly = view
        .tabs
        .iter()
        .any(|t| t.kind == view.active_tab && t.chart.format == ChartFormat::PlotlyJson);

    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!("<html lang=\"{}\">\n<head>\n", view.locale));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&view.page_title)));
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    if needs_plotly {
        html.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_JS_URL));
    }
    html.push_str("</head>\n<body>\n<main>\n");

    html.push_str(&format!("<h1>{}</h1>\n", escape(&view.title)));

    html.push_str("<section class=\"metrics\">\n");
    for metric in &view.metrics {
        html.push_str(&format!(
            "<div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>\n",
            escape(&metric.label),
            escape(&metric.display)
        ));
    }
    html.push_str("</section>\n<hr>\n");

    html.push_str("<nav class=\"tabs\">\n");
    for tab in &view.tabs {
        let class = if tab.kind == view.active_tab { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"?tab={}\"{}>{}</a>\n",
            tab.kind,
            class,
            escape(&tab.label)
        ));
    }
    html.push_str("</nav>\n");

    if let Some(tab) = view.active() {
        html.push_str(&format!("<section class=\"tab-panel\" id=\"tab-{}\">\n", tab.kind));
        html.push_str(&embed_chart(&tab.chart));
        html.push_str(&callout(&Callout {
            kind: CalloutKind::Info,
            message: tab.caption.clone(),
        }));
        html.push_str("</section>\n");
    }
    html.push_str("<hr>\n");

    html.push_str(&format!("<h2>{}</h2>\n", escape(&view.data_heading)));
    html.push_str(&table(&view.data_table));
    html.push_str(&format!("<h2>{}</h2>\n", escape(&view.growth_heading)));
    html.push_str(&table(&view.growth_table));

    html.push_str(&format!("<h2>{}</h2>\n", escape(&view.insights_heading)));
    html.push_str("<section class=\"columns\">\n");
    for insight in &view.insights {
        html.push_str(&format!("<div>{}</div>\n", callout(insight)));
    }
    html.push_str("</section>\n");

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Chart markup: inline SVG, or a div plus a plotly.js call
fn embed_chart(chart: &RenderedChart) -> String {
    let id = format!("chart-{}", chart.kind);

    match chart.format {
        ChartFormat::Svg => format!("<div class=\"chart\" id=\"{id}\">{}</div>\n", chart.body),
        ChartFormat::PlotlyJson => {
            // keep "</script>" inside the JSON from closing the tag
            let figure = chart.body.replace("</", "<\\/");
            format!(
                "<div class=\"chart\" id=\"{id}\"></div>\n<script>\n(function () {{\n  var fig = {figure};\n  Plotly.newPlot(\"{id}\", fig.data, fig.layout, {{ responsive: true }});\n}})();\n</script>\n"
            )
        }
    }
}

fn callout(callout: &Callout) -> String {
    let class = match callout.kind {
        CalloutKind::Info => "callout-info",
        CalloutKind::Success => "callout-success",
        CalloutKind::Warning => "callout-warning",
    };
    format!(
        "<div class=\"callout {}\">{}</div>\n",
        class,
        escape(&callout.message)
    )
}

fn table(table: &DataTable) -> String {
    let mut out = String::from("<table>\n<thead><tr><th></th>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape(column)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (i, row) in table.rows.iter().enumerate() {
        out.push_str(&format!("<tr><td class=\"index\">{}</td>", i));
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartKind, RendererKind};
    use crate::dashboard::Dashboard;
    use crate::locale::Locale;
    use crate::sales::chicken_sales_2024;

    fn page(renderer: RendererKind, tab: ChartKind) -> String {
        let view = Dashboard::new(renderer.build(), Locale::Ko)
            .render(&chicken_sales_2024(), tab)
            .unwrap();
        render_page(&view)
    }

    #[test]
    fn test_page_layout() {
        let html = page(RendererKind::Svg, ChartKind::Line);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>치킨 판매량 시각화</title>"));
        assert!(html.contains("<h1>🍗 월별 치킨 판매량 분석</h1>"));
        assert_eq!(html.matches("class=\"metric\"").count(), 4);
        assert!(html.contains("8,260개"));
        assert_eq!(html.matches("<table>").count(), 2);
        assert!(html.contains("callout-success"));
        assert!(html.contains("최저 판매 월: 1월 (450개)"));
    }

    #[test]
    fn test_only_active_tab_is_embedded() {
        let html = page(RendererKind::Svg, ChartKind::Bar);

        assert!(html.contains("<a href=\"?tab=bar\" class=\"active\">"));
        assert!(html.contains("<a href=\"?tab=line\">"));
        assert_eq!(html.matches("<svg").count(), 1);
        assert!(html.contains("<div class=\"chart\" id=\"chart-bar\"><svg"));
        assert!(html.contains("막대 그래프는"));
        assert!(!html.contains("plotly"));
    }

    #[test]
    fn test_plotly_page_loads_script() {
        let html = page(RendererKind::Plotly, ChartKind::Combo);

        assert!(html.contains(PLOTLY_JS_URL));
        assert!(html.contains("Plotly.newPlot(\"chart-combo\""));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_growth_table_rows() {
        let html = page(RendererKind::Svg, ChartKind::Line);

        assert!(html.contains("<th>성장률</th>"));
        assert!(html.contains("<td>초기</td>"));
        assert!(html.contains("<td>+35.4%</td>"));
    }
}
