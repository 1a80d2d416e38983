//! Input for the bar-chart widget.

use super::record::MonthlyRecord;
use super::LedgerError;
use serde::{Deserialize, Serialize};

pub const CHART_LABELS: [&str; 2] = ["Credited", "Debited"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS colour string at `opacity`, e.g. `rgba(0, 150, 136, 1)`.
    pub fn rgba(&self, opacity: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, opacity)
    }
}

/// Display settings handed to the chart widget untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Currency prefix on the y axis and in the month list.
    pub y_axis_label: String,
    pub y_axis_suffix: String,
    pub from_zero: bool,
    pub decimal_places: u8,
    pub bar_color: Rgb,
    pub label_color: Rgb,
    pub background: String,
    pub vertical_label_rotation: i16,
    pub width: u32,
    pub height: u32,
    pub border_radius: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_axis_label: "₹".to_string(),
            y_axis_suffix: String::new(),
            from_zero: true,
            decimal_places: 0,
            bar_color: Rgb::new(0, 150, 136),
            label_color: Rgb::new(0, 0, 0),
            background: "#ffffff".to_string(),
            vertical_label_rotation: 30,
            width: 300,
            height: 250,
            border_radius: 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub data: Vec<u32>,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartInput {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub config: ChartConfig,
}

impl ChartInput {
    /// Values of the single series.
    pub fn values(&self) -> &[u32] {
        self.datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Two bars, credited then debited, passed through without scaling.
pub fn chart_data(selected: &MonthlyRecord, config: &ChartConfig) -> ChartInput {
    ChartInput {
        labels: CHART_LABELS.iter().map(|l| l.to_string()).collect(),
        datasets: vec![Dataset {
            data: vec![selected.credited, selected.debited],
            color: config.bar_color.rgba(1.0),
        }],
        config: config.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::record::sample_categories;

    fn record(credited: u32, debited: u32) -> MonthlyRecord {
        MonthlyRecord {
            label: "Jan 2024".to_string(),
            credited,
            debited,
            categories: sample_categories(),
        }
    }

    #[test]
    fn chart_passes_totals_through() {
        let input = chart_data(&record(4200, 1700), &ChartConfig::default());

        assert_eq!(input.labels, vec!["Credited", "Debited"]);
        assert_eq!(input.values(), &[4200, 1700]);
        assert_eq!(input.datasets[0].color, "rgba(0, 150, 136, 1)");
    }

    #[test]
    fn rgba_renders_fractional_opacity() {
        assert_eq!(Rgb::new(0, 0, 0).rgba(0.5), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn chart_serializes_for_the_widget() {
        let json = chart_data(&record(1000, 500), &ChartConfig::default())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["datasets"][0]["data"], serde_json::json!([1000, 500]));
        assert_eq!(value["config"]["y_axis_label"], "₹");
        assert_eq!(value["config"]["from_zero"], true);
        assert_eq!(value["config"]["vertical_label_rotation"], 30);
    }
}
