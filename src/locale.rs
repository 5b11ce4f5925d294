//! Display labels
//!
//! Every user-facing string of the dashboard lives here, keyed by locale.
//! Korean is the default and matches the page the dashboard was designed
//! for; English is provided for non-Korean readers.

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::chart::ChartKind;

/// The twelve calendar months in order
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Look up a month by its 1-based number
pub fn month_from_number(number: u32) -> Option<Month> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(index).copied()
}

/// Parse a month cell.
///
/// Accepts `1`-`12`, the Korean form `"3월"`, full English names and
/// three-letter abbreviations (case-insensitive).
pub fn parse_month(s: &str) -> Option<Month> {
    let trimmed = s.trim();
    let numeric = trimmed.strip_suffix('월').unwrap_or(trimmed).trim();

    if let Ok(n) = numeric.parse::<u32>() {
        return month_from_number(n);
    }

    let lower = trimmed.to_lowercase();
    MONTHS.iter().copied().find(|m| {
        let name = m.name().to_lowercase();
        lower == name || (lower.len() == 3 && name.starts_with(&lower))
    })
}

/// Display language of the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Korean
    #[default]
    Ko,
    /// English
    En,
}

impl Locale {
    /// Get the label set for this locale
    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::Ko => &KO,
            Locale::En => &EN,
        }
    }

    /// Format a month the way tables and chart axes show it
    pub fn month_label(&self, month: Month) -> String {
        match self {
            Locale::Ko => format!("{}월", month.number_from_month()),
            Locale::En => month.name()[..3].to_string(),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Locale::Ko),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("Invalid locale: {}. Use ko or en", other)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Static label set for one locale
#[derive(Debug)]
pub struct Labels {
    pub page_title: &'static str,
    pub title: &'static str,

    pub metric_total: &'static str,
    pub metric_average: &'static str,
    pub metric_max: &'static str,
    pub metric_min: &'static str,
    /// Appended directly to formatted quantities
    pub unit_suffix: &'static str,

    pub month_column: &'static str,
    pub units_column: &'static str,
    pub growth_column: &'static str,
    pub initial: &'static str,

    pub data_heading: &'static str,
    pub growth_heading: &'static str,
    pub insights_heading: &'static str,
    pub best_month: &'static str,
    pub worst_month: &'static str,

    pub combo_bar_name: &'static str,
    pub combo_line_name: &'static str,

    /// Tab label, chart title and caption, in `ChartKind::all()` order
    tabs: [TabLabels; 4],
}

#[derive(Debug)]
struct TabLabels {
    tab: &'static str,
    chart_title: &'static str,
    caption: &'static str,
}

impl Labels {
    fn tab(&self, kind: ChartKind) -> &TabLabels {
        match kind {
            ChartKind::Line => &self.tabs[0],
            ChartKind::Bar => &self.tabs[1],
            ChartKind::Area => &self.tabs[2],
            ChartKind::Combo => &self.tabs[3],
        }
    }

    pub fn tab_label(&self, kind: ChartKind) -> &'static str {
        self.tab(kind).tab
    }

    pub fn chart_title(&self, kind: ChartKind) -> &'static str {
        self.tab(kind).chart_title
    }

    pub fn caption(&self, kind: ChartKind) -> &'static str {
        self.tab(kind).caption
    }
}

static KO: Labels = Labels {
    page_title: "치킨 판매량 시각화",
    title: "🍗 월별 치킨 판매량 분석",
    metric_total: "총 판매량",
    metric_average: "평균 판매량",
    metric_max: "최대 판매량",
    metric_min: "최소 판매량",
    unit_suffix: "개",
    month_column: "월",
    units_column: "판매량(개)",
    growth_column: "성장률",
    initial: "초기",
    data_heading: "📋 판매량 데이터",
    growth_heading: "📈 월별 성장률",
    insights_heading: "💡 주요 인사이트",
    best_month: "최고 판매 월",
    worst_month: "최저 판매 월",
    combo_bar_name: "판매량",
    combo_line_name: "추이선",
    tabs: [
        TabLabels {
            tab: "📊 꺾은선 그래프",
            chart_title: "월별 치킨 판매량 추이",
            caption: "💡 꺾은선 그래프는 시간에 따른 판매량의 변화 추이를 명확하게 보여줍니다.",
        },
        TabLabels {
            tab: "📈 막대 그래프",
            chart_title: "월별 치킨 판매량 비교",
            caption: "💡 막대 그래프는 각 월별 판매량을 직관적으로 비교할 수 있습니다.",
        },
        TabLabels {
            tab: "🔵 영역 그래프",
            chart_title: "월별 누적 판매량 변화",
            caption: "💡 영역 그래프는 판매량의 누적 변화를 시각화합니다.",
        },
        TabLabels {
            tab: "🎯 조합 그래프",
            chart_title: "월별 치킨 판매량 (조합 차트)",
            caption: "💡 조합 그래프는 막대와 꺾은선을 함께 사용하여 데이터를 다각도로 분석합니다.",
        },
    ],
};

static EN: Labels = Labels {
    page_title: "Chicken Sales Visualization",
    title: "🍗 Monthly Chicken Sales Analysis",
    metric_total: "Total sales",
    metric_average: "Average sales",
    metric_max: "Highest sales",
    metric_min: "Lowest sales",
    unit_suffix: " units",
    month_column: "Month",
    units_column: "Units sold",
    growth_column: "Growth",
    initial: "initial",
    data_heading: "📋 Sales data",
    growth_heading: "📈 Monthly growth rate",
    insights_heading: "💡 Key insights",
    best_month: "Best month",
    worst_month: "Worst month",
    combo_bar_name: "Units sold",
    combo_line_name: "Trend",
    tabs: [
        TabLabels {
            tab: "📊 Line chart",
            chart_title: "Monthly chicken sales trend",
            caption: "💡 The line chart shows how sales move from month to month.",
        },
        TabLabels {
            tab: "📈 Bar chart",
            chart_title: "Monthly chicken sales comparison",
            caption: "💡 The bar chart makes month-to-month comparison easy.",
        },
        TabLabels {
            tab: "🔵 Area chart",
            chart_title: "Monthly sales volume",
            caption: "💡 The area chart visualizes the volume of sales over the year.",
        },
        TabLabels {
            tab: "🎯 Combo chart",
            chart_title: "Monthly chicken sales (combo)",
            caption: "💡 The combo chart overlays bars and a trend line for a second angle on the data.",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_forms() {
        assert_eq!(parse_month("1"), Some(Month::January));
        assert_eq!(parse_month("12월"), Some(Month::December));
        assert_eq!(parse_month(" 7 월 "), Some(Month::July));
        assert_eq!(parse_month("march"), Some(Month::March));
        assert_eq!(parse_month("Oct"), Some(Month::October));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("0월"), None);
        assert_eq!(parse_month("Ju"), None);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(Locale::Ko.month_label(Month::October), "10월");
        assert_eq!(Locale::En.month_label(Month::October), "Oct");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("KO".parse::<Locale>(), Ok(Locale::Ko));
        assert_eq!("english".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_tab_labels_follow_kind() {
        let labels = Locale::Ko.labels();
        assert_eq!(labels.tab_label(ChartKind::Bar), "📈 막대 그래프");
        assert_eq!(labels.chart_title(ChartKind::Combo), "월별 치킨 판매량 (조합 차트)");
    }
}
