//! SVG Renderer
//!
//! Draws charts with plotters on its SVG backend over a segmented month
//! axis. plotters has no notion of tooltips, so once the figure is drawn a
//! transparent hotspot layer is appended: one shape per data point, each
//! carrying a `<title>` the browser shows on hover.

use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue, SegmentedCoord};
use plotters::coord::types::{RangedCoordf64, RangedCoordu32};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::theme::{parse_color, reds_rgb};
use super::{ChartError, ChartFormat, ChartKind, ChartSpec, ChartTheme, RenderedChart, SeriesRenderer};
use crate::markup::escape_xml;

/// Horizontal gap on each side of a bar, in pixels
const BAR_GAP: u32 = 6;

/// plotters' SVG backend reports `std::io::Error`
type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

type MonthChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<SegmentedCoord<RangedCoordu32>, RangedCoordf64>>;

/// Inline SVG backend
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SeriesRenderer for SvgRenderer {
    fn format(&self) -> ChartFormat {
        ChartFormat::Svg
    }

    fn render(&self, spec: &ChartSpec, theme: &ChartTheme) -> Result<RenderedChart, ChartError> {
        spec.validate()?;

        let palette = Palette::from_theme(theme);
        let mut svg = String::with_capacity(16 * 1024);

        let hotspots = {
            let root =
                SVGBackend::with_string(&mut svg, (theme.width, theme.height)).into_drawing_area();
            let hotspots = draw_chart(&root, spec, theme, &palette).map_err(drawing_error)?;
            root.present().map_err(drawing_error)?;
            hotspots
        };

        Ok(RenderedChart {
            kind: spec.kind,
            format: ChartFormat::Svg,
            body: with_hotspots(&svg, &hotspots),
        })
    }
}

fn drawing_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::Drawing(err.to_string())
}

/// Theme colors resolved for plotters
struct Palette {
    primary: RGBAColor,
    area_fill: RGBAColor,
    combo_bar_fill: RGBAColor,
    background: RGBAColor,
    grid: RGBAColor,
    text: RGBAColor,
}

impl Palette {
    fn from_theme(theme: &ChartTheme) -> Self {
        Self {
            primary: color(&theme.primary_color, RGBAColor(255, 107, 107, 1.0)),
            area_fill: color(&theme.area_fill, RGBAColor(255, 107, 107, 0.4)),
            combo_bar_fill: color(&theme.combo_bar_fill, RGBAColor(255, 107, 107, 0.6)),
            background: color(&theme.background, RGBAColor(255, 255, 255, 1.0)),
            grid: color(&theme.grid_color, RGBAColor(235, 240, 248, 1.0)),
            text: color(&theme.text_color, RGBAColor(42, 63, 95, 1.0)),
        }
    }
}

fn color(value: &str, fallback: RGBAColor) -> RGBAColor {
    match parse_color(value) {
        Some((r, g, b, a)) => RGBAColor(r, g, b, a),
        None => {
            tracing::warn!(color = value, "Unrecognized theme color, using default");
            fallback
        }
    }
}

/// A data point's hover target, in pixels
#[derive(Debug, Clone, PartialEq)]
enum Hotspot {
    Marker { cx: i32, cy: i32, r: u32, title: String },
    Bar { x: i32, y: i32, width: i32, height: i32, title: String },
}

impl Hotspot {
    fn to_svg(&self) -> String {
        match self {
            Hotspot::Marker { cx, cy, r, title } => format!(
                r#"<circle class="marker" cx="{}" cy="{}" r="{}"><title>{}</title></circle>"#,
                cx,
                cy,
                r,
                escape_xml(title)
            ),
            Hotspot::Bar { x, y, width, height, title } => format!(
                r#"<rect class="bar" x="{}" y="{}" width="{}" height="{}"><title>{}</title></rect>"#,
                x,
                y,
                width,
                height,
                escape_xml(title)
            ),
        }
    }
}

/// Append the hotspot layer just before the closing `</svg>`
fn with_hotspots(svg: &str, hotspots: &[Hotspot]) -> String {
    let svg = svg.trim();
    let close = svg.rfind("</svg>").unwrap_or(svg.len());

    let mut out = String::with_capacity(svg.len() + hotspots.len() * 128);
    out.push_str(&svg[..close]);
    out.push_str(r##"<g class="hotspots" fill="#000000" fill-opacity="0">"##);
    for spot in hotspots {
        out.push_str(&spot.to_svg());
    }
    out.push_str("</g></svg>");
    out
}

/// Round the top of the value axis up to a 1/2/5 step, leaving ~10% headroom
fn nice_axis(max: u32) -> (f64, f64) {
    let target = (f64::from(max) * 1.1).max(1.0);
    let rough = target / 5.0;
    let magnitude = 10f64.powi(rough.log10().floor() as i32);
    let residual = rough / magnitude;

    let step = if residual < 1.5 {
        1.0
    } else if residual < 3.0 {
        2.0
    } else if residual < 7.0 {
        5.0
    } else {
        10.0
    } * magnitude;
    let step = step.max(1.0);

    ((target / step).ceil() * step, step)
}

fn month_label(labels: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn points(spec: &ChartSpec) -> impl Iterator<Item = (SegmentValue<u32>, f64)> + '_ {
    spec.values
        .iter()
        .enumerate()
        .map(|(i, &v)| (SegmentValue::CenterOf(i as u32), f64::from(v)))
}

fn hover_text(label: &str, value: u32) -> String {
    format!("{}: {}", label, value)
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    spec: &ChartSpec,
    theme: &ChartTheme,
    palette: &Palette,
) -> DrawResult<Vec<Hotspot>> {
    root.fill(&palette.background)?;

    let count = spec.values.len() as u32;
    let (y_max, y_step) = nice_axis(spec.max_value());

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 20).into_font().color(&palette.text))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d((0..count).into_segmented(), 0f64..y_max)?;

    let labels = &spec.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count as usize)
        .y_labels((y_max / y_step).round() as usize + 1)
        .x_desc(&spec.x_title)
        .y_desc(&spec.y_title)
        .axis_style(ShapeStyle::from(&palette.grid).stroke_width(1))
        .bold_line_style(ShapeStyle::from(&palette.grid).stroke_width(1))
        .light_line_style(ShapeStyle::from(&palette.background).stroke_width(0))
        .label_style(("sans-serif", 13).into_font().color(&palette.text))
        .axis_desc_style(("sans-serif", 14).into_font().color(&palette.text))
        .x_label_formatter(&|x| month_label(labels, x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    let marker = |size: f64| (size / 2.0).round().max(1.0) as u32;

    let hotspots = match spec.kind {
        ChartKind::Line => {
            let r = marker(theme.marker_size);
            draw_line(&mut chart, spec, palette.primary, theme.line_width, r, None)?;
            markers(&chart, spec, r)
        }
        ChartKind::Bar => {
            let (min, max) = (f64::from(spec.min_value()), f64::from(spec.max_value()));
            draw_bars(
                &mut chart,
                spec,
                |value| {
                    let t = if max > min { (value - min) / (max - min) } else { 1.0 };
                    let (r, g, b) = reds_rgb(t);
                    RGBAColor(r, g, b, 1.0)
                },
                None,
            )?;
            bars(&chart, spec)
        }
        ChartKind::Area => {
            chart.draw_series(AreaSeries::new(points(spec), 0.0, palette.area_fill.filled()))?;
            let r = marker(theme.area_line_width * 2.0);
            draw_line(&mut chart, spec, palette.primary, theme.area_line_width, r, None)?;
            markers(&chart, spec, r)
        }
        ChartKind::Combo => {
            let fill = palette.combo_bar_fill;
            draw_bars(&mut chart, spec, |_| fill, Some((spec.bar_name.as_str(), fill)))?;
            let r = marker(theme.combo_marker_size);
            draw_line(
                &mut chart,
                spec,
                palette.primary,
                theme.line_width,
                r,
                Some(spec.line_name.as_str()),
            )?;

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&palette.background.mix(0.8))
                .border_style(ShapeStyle::from(&palette.grid).stroke_width(1))
                .label_font(("sans-serif", 13).into_font().color(&palette.text))
                .draw()?;

            let mut spots = bars(&chart, spec);
            spots.extend(markers(&chart, spec, r));
            spots
        }
    };

    Ok(hotspots)
}

fn draw_line(
    chart: &mut MonthChart<'_, '_>,
    spec: &ChartSpec,
    color: RGBAColor,
    width: f64,
    radius: u32,
    legend: Option<&str>,
) -> DrawResult<()> {
    let stroke = ShapeStyle::from(&color).stroke_width(width.round().max(1.0) as u32);

    let series = chart.draw_series(LineSeries::new(points(spec), stroke))?;
    if let Some(name) = legend {
        series
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
    }

    chart.draw_series(points(spec).map(|p| Circle::new(p, radius, color.filled())))?;
    Ok(())
}

fn draw_bars(
    chart: &mut MonthChart<'_, '_>,
    spec: &ChartSpec,
    fill: impl Fn(f64) -> RGBAColor,
    legend: Option<(&str, RGBAColor)>,
) -> DrawResult<()> {
    let series = chart.draw_series(spec.values.iter().enumerate().map(|(i, &v)| {
        let i = i as u32;
        let value = f64::from(v);
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), value)],
            fill(value).filled(),
        );
        bar.set_margin(0, 0, BAR_GAP, BAR_GAP);
        bar
    }))?;

    if let Some((name, color)) = legend {
        series
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }
    Ok(())
}

fn markers(chart: &MonthChart<'_, '_>, spec: &ChartSpec, radius: u32) -> Vec<Hotspot> {
    spec.values
        .iter()
        .zip(&spec.labels)
        .enumerate()
        .map(|(i, (&value, label))| {
            let (cx, cy) = chart.backend_coord(&(SegmentValue::CenterOf(i as u32), f64::from(value)));
            Hotspot::Marker {
                cx,
                cy,
                r: radius + 2,
                title: hover_text(label, value),
            }
        })
        .collect()
}

fn bars(chart: &MonthChart<'_, '_>, spec: &ChartSpec) -> Vec<Hotspot> {
    let gap = BAR_GAP as i32;

    spec.values
        .iter()
        .zip(&spec.labels)
        .enumerate()
        .map(|(i, (&value, label))| {
            let i = i as u32;
            let (left, top) = chart.backend_coord(&(SegmentValue::Exact(i), f64::from(value)));
            let (right, bottom) = chart.backend_coord(&(SegmentValue::Exact(i + 1), 0.0));
            Hotspot::Bar {
                x: left + gap,
                y: top,
                width: (right - left - 2 * gap).max(1),
                height: (bottom - top).max(0),
                title: hover_text(label, value),
            }
        })
        .collect()
}
