//! Chart configuration
//!
//! Line-chart options in the shape uPlot expects. A fresh `ChartConfig` is
//! built for every variable; nothing is shared or mutated between charts.

use crate::series::{Sample, TimeSeries};
use serde::{Deserialize, Serialize};

/// Size and stroke settings shared by every chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartStyle {
    #[serde(default = "default_class")]
    pub class: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_line_width")]
    pub line_width: u32,
    #[serde(default = "default_label_size")]
    pub label_size: u32,
}

fn default_class() -> String {
    "my-chart".to_string()
}

fn default_width() -> u32 {
    900
}

fn default_height() -> u32 {
    300
}

fn default_line_width() -> u32 {
    3
}

fn default_label_size() -> u32 {
    40
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            class: default_class(),
            width: default_width(),
            height: default_height(),
            line_width: default_line_width(),
            label_size: default_label_size(),
        }
    }
}

/// Style of one plotted series; the first entry describes the x axis
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_gaps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<u32>>,
}

/// Style of one axis; the first entry is the time axis
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AxisStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_size: Option<u32>,
}

/// Complete chart options for one variable
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartConfig {
    pub id: String,
    pub class: String,
    pub width: u32,
    pub height: u32,
    pub series: Vec<SeriesStyle>,
    pub axes: Vec<AxisStyle>,
}

impl ChartConfig {
    /// Build the options for a variable drawn in `color`
    pub fn for_variable(name: &str, units: &str, color: &str, style: &ChartStyle) -> Self {
        let line = SeriesStyle {
            label: Some(name.to_string()),
            show: Some(true),
            span_gaps: Some(false),
            width: Some(style.line_width),
            stroke: Some(color.to_string()),
            dash: None,
        };

        let y_axis = AxisStyle {
            label: Some(axis_label(name, units)),
            stroke: Some(color.to_string()),
            label_size: Some(style.label_size),
        };

        Self {
            id: element_id(name),
            class: style.class.clone(),
            width: style.width,
            height: style.height,
            series: vec![SeriesStyle::default(), line],
            axes: vec![AxisStyle::default(), y_axis],
        }
    }

    /// Add a dashed smoothed line under the raw series
    pub fn with_rolling(mut self, name: &str, color: &str, style: &ChartStyle) -> Self {
        self.series.push(SeriesStyle {
            label: Some(format!("{} (rolling)", name)),
            show: Some(true),
            span_gaps: Some(true),
            width: Some((style.line_width / 2).max(1)),
            stroke: Some(color.to_string()),
            dash: Some(vec![6, 4]),
        });
        self
    }
}

/// Chart options together with the columns they plot
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub config: ChartConfig,
    pub timestamps: Vec<i64>,
    pub columns: Vec<Vec<Sample>>,
}

impl Chart {
    /// Chart of a series, with an optional smoothed overlay
    pub fn new(
        series: &TimeSeries,
        rolling: Option<&[Sample]>,
        color: &str,
        style: &ChartStyle,
    ) -> Self {
        let mut config = ChartConfig::for_variable(series.name(), series.units(), color, style);
        let mut columns = vec![series.samples().to_vec()];

        if let Some(rolling) = rolling.filter(|r| r.len() == series.len()) {
            config = config.with_rolling(series.name(), color, style);
            columns.push(rolling.to_vec());
        }

        Self {
            config,
            timestamps: series.timestamps().to_vec(),
            columns,
        }
    }

    /// Data in uPlot's column layout: `[timestamps, values, ...]`
    pub fn data_json(&self) -> serde_json::Value {
        let mut data = vec![serde_json::json!(self.timestamps)];
        data.extend(self.columns.iter().map(|c| serde_json::json!(c)));
        serde_json::Value::Array(data)
    }
}

/// Y-axis label: `"{name} [{units}]"`
pub fn axis_label(name: &str, units: &str) -> String {
    format!("{} [{}]", name, units)
}

/// Element id for a variable: whitespace becomes `-`, letters are lowercased
pub fn element_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id() {
        assert_eq!(element_id("Dissolved Oxygen"), "dissolved-oxygen");
        assert_eq!(element_id("Chlorophyll-a"), "chlorophyll-a");
        assert_eq!(element_id("pH"), "ph");
    }

    #[test]
    fn test_config_for_variable() {
        let style = ChartStyle::default();
        let config = ChartConfig::for_variable("Temperature", "C", "red", &style);

        assert_eq!(config.id, "temperature");
        assert_eq!((config.width, config.height), (900, 300));
        assert_eq!(config.series.len(), 2);
        assert_eq!(config.series[1].stroke.as_deref(), Some("red"));
        assert_eq!(config.series[1].width, Some(3));
        assert_eq!(config.axes[1].label.as_deref(), Some("Temperature [C]"));
        assert_eq!(config.axes[1].label_size, Some(40));
    }

    #[test]
    fn test_configs_are_independent() {
        let style = ChartStyle::default();
        let first = ChartConfig::for_variable("Temperature", "C", "red", &style);
        let second = ChartConfig::for_variable("pH", "", "purple", &style);

        assert_eq!(first.series[1].label.as_deref(), Some("Temperature"));
        assert_eq!(second.series[1].label.as_deref(), Some("pH"));
        assert_eq!(first.axes[1].stroke.as_deref(), Some("red"));
    }

    #[test]
    fn test_config_serializes_uplot_keys() {
        let config = ChartConfig::for_variable("pH", "total", "purple", &ChartStyle::default());
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["series"][0], serde_json::json!({}));
        assert_eq!(json["series"][1]["spanGaps"], false);
        assert_eq!(json["axes"][1]["labelSize"], 40);
    }

    #[test]
    fn test_chart_data_layout() {
        let series =
            TimeSeries::new("Temperature", "C", vec![100, 200], vec![Some(20.1), None]).unwrap();
        let rolling = [Some(20.0), Some(20.0)];
        let chart = Chart::new(&series, Some(&rolling[..]), "red", &ChartStyle::default());

        assert_eq!(chart.config.series.len(), 3);
        assert_eq!(
            chart.data_json(),
            serde_json::json!([[100, 200], [20.1, null], [20.0, 20.0]])
        );
    }

    #[test]
    fn test_mismatched_rolling_is_ignored() {
        let series = TimeSeries::new("pH", "", vec![1, 2], vec![Some(8.0), Some(8.1)]).unwrap();
        let chart = Chart::new(&series, Some(&[Some(8.0)][..]), "purple", &ChartStyle::default());
        assert_eq!(chart.columns.len(), 1);
    }
}
