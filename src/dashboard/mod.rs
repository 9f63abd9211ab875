//! Buoydash Dashboard
//!
//! Turns a `StationDocument` into one chart and summary panel per tracked
//! variable, and renders the result:
//!
//! - **chart**: uPlot chart options and data columns
//! - **panel**: Latest value, mean readout and trend arrow
//! - **render**: HTML page and terminal table
//!
//! Each variable is built independently. A variable that is missing or
//! malformed produces an error outcome and the remaining variables still
//! render.

pub mod chart;
pub mod panel;
pub mod render;

pub use chart::{axis_label, element_id, AxisStyle, Chart, ChartConfig, ChartStyle, SeriesStyle};
pub use panel::{format_timestamp, Segment, SummaryPanel, TrendArrow, TrendDirection};
pub use render::{render_html, render_text};

use crate::document::{DocumentError, DocumentResult, StationDocument, Trend};
use crate::series::LatestReading;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A variable to show on the dashboard and the color it is drawn in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackedVariable {
    pub name: String,
    pub color: String,
    /// Arrow scale used when the document carries a slope without one
    #[serde(default)]
    pub slope_scale: Option<f64>,
}

impl TrackedVariable {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            slope_scale: None,
        }
    }

    /// Builder: set fallback arrow scale
    pub fn slope_scale(mut self, scale: f64) -> Self {
        self.slope_scale = Some(scale);
        self
    }

    /// The four variables of a water-quality buoy
    pub fn defaults() -> Vec<TrackedVariable> {
        vec![
            TrackedVariable::new("Temperature", "red").slope_scale(10.0),
            TrackedVariable::new("Dissolved Oxygen", "blue").slope_scale(10.0),
            TrackedVariable::new("Chlorophyll-a", "green").slope_scale(40.0),
            TrackedVariable::new("pH", "purple").slope_scale(1.0),
        ]
    }
}

/// Drop variables whose element id repeats an earlier one
///
/// Each chart is drawn into the element with its id, so two entries with the
/// same id would both land in the first one.
pub fn dedupe_variables(variables: Vec<TrackedVariable>) -> Vec<TrackedVariable> {
    let mut seen = HashSet::new();
    variables
        .into_iter()
        .filter(|tracked| {
            let fresh = seen.insert(element_id(&tracked.name));
            if !fresh {
                tracing::warn!(variable = %tracked.name, "Duplicate tracked variable ignored");
            }
            fresh
        })
        .collect()
}

/// Chart and readout for one variable
#[derive(Debug, Clone, PartialEq)]
pub struct VariablePanel {
    pub chart: Chart,
    pub summary: SummaryPanel,
}

/// Outcome of building one variable
#[derive(Debug)]
pub struct VariableOutcome {
    pub name: String,
    pub color: String,
    pub result: DocumentResult<VariablePanel>,
}

/// Everything the renderers need
#[derive(Debug)]
pub struct Dashboard {
    pub title: String,
    pub variables: Vec<VariableOutcome>,
}

/// Serializable digest of one variable
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VariableSummary {
    pub name: String,
    pub units: Option<String>,
    pub mean: Option<f64>,
    pub latest: Option<LatestReading>,
    pub slope: Option<f64>,
    pub direction: Option<TrendDirection>,
    pub error: Option<String>,
}

impl Dashboard {
    /// Number of variables that built successfully
    pub fn rendered_count(&self) -> usize {
        self.variables.iter().filter(|v| v.result.is_ok()).count()
    }

    /// Per-variable digest, including failures
    pub fn summaries(&self) -> Vec<VariableSummary> {
        self.variables
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(panel) => VariableSummary {
                    name: outcome.name.clone(),
                    units: Some(panel.summary.units.clone()),
                    mean: panel.summary.mean,
                    latest: panel.summary.latest,
                    slope: panel.summary.arrow.as_ref().map(|a| a.slope),
                    direction: panel.summary.arrow.as_ref().map(|a| a.direction()),
                    error: None,
                },
                Err(e) => VariableSummary {
                    name: outcome.name.clone(),
                    units: None,
                    mean: None,
                    latest: None,
                    slope: None,
                    direction: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }
}

/// Settings for building a dashboard
#[derive(Debug, Clone)]
pub struct BuildOptions<'a> {
    pub variables: &'a [TrackedVariable],
    pub style: &'a ChartStyle,
    pub utc_offset: FixedOffset,
    /// Fallback title when the document has no station name
    pub title: &'a str,
}

/// Build a panel per tracked variable
pub fn build_dashboard(doc: &StationDocument, options: &BuildOptions<'_>) -> Dashboard {
    let variables = options
        .variables
        .iter()
        .map(|tracked| {
            let result = build_variable(doc, tracked, options);
            match &result {
                Ok(panel) => tracing::debug!(
                    variable = %tracked.name,
                    mean = ?panel.summary.mean,
                    latest = ?panel.summary.latest.map(|l| l.value),
                    "Built variable panel"
                ),
                Err(e) => tracing::warn!(variable = %tracked.name, error = %e, "Skipping variable"),
            }
            VariableOutcome {
                name: tracked.name.clone(),
                color: tracked.color.clone(),
                result,
            }
        })
        .collect();

    Dashboard {
        title: doc.name.clone().unwrap_or_else(|| options.title.to_string()),
        variables,
    }
}

fn build_variable(
    doc: &StationDocument,
    tracked: &TrackedVariable,
    options: &BuildOptions<'_>,
) -> Result<VariablePanel, DocumentError> {
    let data = doc.variable(&tracked.name)?;
    let series = doc.series_for(&tracked.name, &data)?;

    let rolling = (!data.rolling.is_empty()).then_some(data.rolling.as_slice());
    let chart = Chart::new(&series, rolling, &tracked.color, options.style);

    let trend = data.trend().or_else(|| {
        let slope = data.slope.filter(|s| s.is_finite())?;
        match tracked.slope_scale {
            Some(scale) if scale > 0.0 => Some(Trend { slope, scale }),
            _ => {
                tracing::warn!(variable = %tracked.name, "Slope without a scale; arrow omitted");
                None
            }
        }
    });

    let summary = SummaryPanel {
        name: tracked.name.clone(),
        units: series.units().to_string(),
        color: tracked.color.clone(),
        latest: series.latest(),
        mean: series.mean(),
        arrow: trend.map(|t| TrendArrow::new(t, tracked.color.clone())),
        utc_offset: options.utc_offset,
    };

    Ok(VariablePanel { chart, summary })
}
