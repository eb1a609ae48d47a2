use serde::Serialize;
use std::collections::BTreeMap;

/// A single plotted value with its x-axis label.
///
/// `value` is optional so a chart can carry an unset bar; anything reading
/// the series for scaling treats a missing value as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub value: Option<f64>,
    pub label: String,
}

impl ChartPoint {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            label: label.into(),
        }
    }

    #[cfg(test)]
    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }

    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

pub const MARK_DOT_COLOR: &str = "#4CAF50";
pub const MARK_ACTIVE_OPACITY: f64 = 0.8;

/// Calendar highlight for a day with at least one workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMark {
    pub marked: bool,
    pub dot_color: &'static str,
    pub active_opacity: f64,
}

impl Default for CalendarMark {
    fn default() -> Self {
        Self {
            marked: true,
            dot_color: MARK_DOT_COLOR,
            active_opacity: MARK_ACTIVE_OPACITY,
        }
    }
}

/// ISO date (`YYYY-MM-DD`) to marker.
pub type CalendarMarks = BTreeMap<String, CalendarMark>;
