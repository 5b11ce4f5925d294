//! Growth Rate Calculator
//!
//! Month-over-month percentage change in units sold.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::types::SalesRecord;

/// Growth of one month relative to the month before it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthRate {
    /// First record; there is no previous month
    Initial,
    /// Signed percentage change
    Change(f64),
    /// Previous month sold nothing, so the ratio is undefined
    Undefined,
}

impl GrowthRate {
    /// Numeric percentage, if there is one
    pub fn percent(&self) -> Option<f64> {
        match self {
            GrowthRate::Change(pct) => Some(*pct),
            _ => None,
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, GrowthRate::Initial)
    }

    /// Render with a caller-chosen sentinel for the first month
    pub fn display_with(&self, initial: &str) -> String {
        match self {
            GrowthRate::Initial => initial.to_string(),
            other => other.to_string(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            GrowthRate::Initial => "initial",
            GrowthRate::Change(_) => "change",
            GrowthRate::Undefined => "undefined",
        }
    }
}

impl std::fmt::Display for GrowthRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthRate::Initial => write!(f, "initial"),
            GrowthRate::Change(pct) => write!(f, "{:+.1}%", pct),
            GrowthRate::Undefined => write!(f, "N/A"),
        }
    }
}

impl Serialize for GrowthRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GrowthRate", 3)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("percent", &self.percent())?;
        state.serialize_field("display", &self.to_string())?;
        state.end()
    }
}

/// Growth from `previous` to `current`
pub fn growth_between(previous: u32, current: u32) -> GrowthRate {
    if previous == 0 {
        return GrowthRate::Undefined;
    }

    let previous = f64::from(previous);
    let current = f64::from(current);
    GrowthRate::Change((current - previous) / previous * 100.0)
}

/// One growth rate per record, `Initial` first
pub fn growth_rates(records: &[SalesRecord]) -> Vec<GrowthRate> {
    let mut rates = Vec::with_capacity(records.len());

    if !records.is_empty() {
        rates.push(GrowthRate::Initial);
    }

    for pair in records.windows(2) {
        let rate = growth_between(pair[0].units_sold, pair[1].units_sold);

        if rate == GrowthRate::Undefined {
            tracing::warn!(
                month = pair[1].month.name(),
                previous_month = pair[0].month.name(),
                "Previous month sold zero units; growth rate is undefined"
            );
        }

        rates.push(rate);
    }

    rates
}
