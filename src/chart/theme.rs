//! Chart styling constants
//!
//! One warm-red palette shared by every chart kind so the four tabs look
//! like one family.

use serde::Serialize;

/// Plotly's "Reds" sequential scale, as (position, rgb) stops
pub const REDS_SCALE: [(f64, (u8, u8, u8)); 9] = [
    (0.0, (255, 245, 240)),
    (0.125, (254, 224, 210)),
    (0.25, (252, 187, 161)),
    (0.375, (252, 146, 114)),
    (0.5, (251, 106, 74)),
    (0.625, (239, 59, 44)),
    (0.75, (203, 24, 29)),
    (0.875, (165, 15, 21)),
    (1.0, (103, 0, 13)),
];

/// Styling shared by all renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTheme {
    /// Line and marker color
    pub primary_color: String,
    /// Line width of line and combo charts
    pub line_width: f64,
    /// Outline width of the area chart
    pub area_line_width: f64,
    /// Marker diameter of the line chart
    pub marker_size: f64,
    /// Marker diameter of the combo chart's trend line
    pub combo_marker_size: f64,
    pub area_fill: String,
    pub combo_bar_fill: String,
    /// Named continuous scale for bar colors
    pub color_scale: String,
    /// Plotly hover mode
    pub hover_mode: String,
    /// Chart height in pixels
    pub height: u32,
    /// Drawing width in pixels; the page scales SVG output to its container
    pub width: u32,
    pub background: String,
    pub grid_color: String,
    pub text_color: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            primary_color: "#FF6B6B".to_string(),
            line_width: 3.0,
            area_line_width: 2.0,
            marker_size: 10.0,
            combo_marker_size: 8.0,
            area_fill: "rgba(255, 107, 107, 0.4)".to_string(),
            combo_bar_fill: "rgba(255, 107, 107, 0.6)".to_string(),
            color_scale: "Reds".to_string(),
            hover_mode: "x unified".to_string(),
            height: 500,
            width: 960,
            background: "#ffffff".to_string(),
            grid_color: "#ebf0f8".to_string(),
            text_color: "#2a3f5f".to_string(),
        }
    }
}

impl ChartTheme {
    /// Builder method: set chart height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

/// Color at position `t` (clamped to 0..=1) on the Reds scale, as `rgb(r, g, b)`
pub fn reds_color(t: f64) -> String {
    let (r, g, b) = reds_rgb(t);
    format!("rgb({}, {}, {})", r, g, b)
}

/// Color at position `t` (clamped to 0..=1) on the Reds scale
pub fn reds_rgb(t: f64) -> (u8, u8, u8) {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let upper = REDS_SCALE
        .iter()
        .position(|(stop, _)| *stop >= t)
        .unwrap_or(REDS_SCALE.len() - 1);

    if upper == 0 {
        return REDS_SCALE[0].1;
    }

    let (lo_stop, lo) = REDS_SCALE[upper - 1];
    let (hi_stop, hi) = REDS_SCALE[upper];
    let f = (t - lo_stop) / (hi_stop - lo_stop);

    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;

    (mix(lo.0, hi.0), mix(lo.1, hi.1), mix(lo.2, hi.2))
}

/// Parse a theme color: `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
/// Returns the channels plus opacity.
pub fn parse_color(value: &str) -> Option<(u8, u8, u8, f64)> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some((channel(0)?, channel(2)?, channel(4)?, 1.0));
    }

    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

    let channel = |i: usize| parts.get(i)?.parse::<u8>().ok();
    let alpha = match parts.len() {
        3 => 1.0,
        4 => parts[3].parse::<f64>().ok()?.clamp(0.0, 1.0),
        _ => return None,
    };

    Some((channel(0)?, channel(1)?, channel(2)?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(reds_color(0.0), "rgb(255, 245, 240)");
        assert_eq!(reds_color(1.0), "rgb(103, 0, 13)");
        assert_eq!(reds_color(0.5), "rgb(251, 106, 74)");
        assert_eq!(reds_rgb(1.0), (103, 0, 13));
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(reds_color(-3.0), reds_color(0.0));
        assert_eq!(reds_color(7.0), reds_color(1.0));
        assert_eq!(reds_color(f64::NAN), reds_color(0.0));
    }

    #[test]
    fn test_scale_interpolates() {
        // halfway between the 0.5 and 0.625 stops
        assert_eq!(reds_color(0.5625), "rgb(245, 83, 59)");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF6B6B"), Some((255, 107, 107, 1.0)));
        assert_eq!(parse_color("#ebf0f8"), Some((235, 240, 248, 1.0)));
        assert_eq!(parse_color("rgb(103, 0, 13)"), Some((103, 0, 13, 1.0)));
        assert_eq!(
            parse_color("rgba(255, 107, 107, 0.4)"),
            Some((255, 107, 107, 0.4))
        );
        assert_eq!(parse_color("tomato"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("rgb(300, 0, 0)"), None);
    }

    #[test]
    fn test_default_theme() {
        let theme = ChartTheme::default();
        assert_eq!(theme.primary_color, "#FF6B6B");
        assert_eq!(theme.height, 500);
        assert_eq!(theme.with_height(320).height, 320);
    }
}
