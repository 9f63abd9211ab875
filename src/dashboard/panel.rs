//! Summary panel
//!
//! The readout next to each chart: latest value and its time, a trend arrow,
//! and the mean over the document's window.

use crate::document::Trend;
use crate::series::LatestReading;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::f64::consts::PI;

/// Arrow canvas width in pixels
pub const ARROW_CANVAS_WIDTH: f64 = 150.0;

/// Arrow canvas height in pixels
pub const ARROW_CANVAS_HEIGHT: f64 = 100.0;

const ARROW_TIP_X: f64 = 120.0;
const ARROW_HEAD_LEN: f64 = 10.0;

/// Stroke width of the arrow
pub const ARROW_LINE_WIDTH: f64 = 8.0;

/// Label in front of the mean readout
pub const MEAN_LABEL: &str = "14-day Avg";

/// Straight line between two canvas points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Coarse reading of a slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Steady,
    Falling,
}

impl TrendDirection {
    pub fn symbol(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "↑",
            TrendDirection::Steady => "→",
            TrendDirection::Falling => "↓",
        }
    }
}

/// Arrow whose tilt shows the 14-day slope against a fixed scale
///
/// The canvas is 100 px tall and represents `scale` units; a zero slope is a
/// flat arrow across the middle, `+scale/2` rises corner to corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendArrow {
    pub slope: f64,
    pub scale: f64,
    pub color: String,
}

impl TrendArrow {
    pub fn new(trend: Trend, color: impl Into<String>) -> Self {
        Self {
            slope: trend.slope,
            scale: trend.scale,
            color: color.into(),
        }
    }

    pub fn direction(&self) -> TrendDirection {
        if self.slope.abs() < self.scale * 0.05 {
            TrendDirection::Steady
        } else if self.slope > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        }
    }

    /// Shaft followed by the two head strokes, in canvas coordinates (y down)
    pub fn segments(&self) -> [Segment; 3] {
        let half = self.scale / 2.0;
        let slope = self.slope.clamp(-half, half);
        let y = (half - slope) * (ARROW_CANVAS_HEIGHT / self.scale);

        let from = (0.0, ARROW_CANVAS_HEIGHT - y);
        let to = (ARROW_TIP_X, y);
        let angle = (to.1 - from.1).atan2(to.0 - from.0);

        let barb = |offset: f64| Segment {
            from: to,
            to: (
                to.0 - ARROW_HEAD_LEN * (angle + offset).cos(),
                to.1 - ARROW_HEAD_LEN * (angle + offset).sin(),
            ),
        };

        [Segment { from, to }, barb(-PI / 6.0), barb(PI / 6.0)]
    }

    /// SVG path data for all three strokes
    pub fn svg_path(&self) -> String {
        self.segments()
            .iter()
            .map(|s| {
                format!(
                    "M {:.1} {:.1} L {:.1} {:.1}",
                    s.from.0, s.from.1, s.to.0, s.to.1
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Readout for one variable
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPanel {
    pub name: String,
    pub units: String,
    pub color: String,
    pub latest: Option<LatestReading>,
    pub mean: Option<f64>,
    pub arrow: Option<TrendArrow>,
    pub utc_offset: FixedOffset,
}

impl SummaryPanel {
    /// Latest value with units, or "no data"
    pub fn latest_text(&self) -> String {
        match &self.latest {
            Some(latest) => with_units(&latest.value.to_string(), &self.units),
            None => "no data".to_string(),
        }
    }

    /// Date and time of the latest value
    pub fn latest_time_text(&self) -> Option<String> {
        self.latest
            .and_then(|l| format_timestamp(l.timestamp, self.utc_offset))
    }

    /// Mean readout, e.g. `"14-day Avg: 20.30 C"`
    pub fn mean_text(&self) -> String {
        match self.mean {
            Some(mean) => format!("{}: {}", MEAN_LABEL, with_units(&format!("{:.2}", mean), &self.units)),
            None => format!("{}: no data", MEAN_LABEL),
        }
    }
}

fn with_units(value: &str, units: &str) -> String {
    if units.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, units)
    }
}

/// Format Unix seconds as `M/D/YYYY, H:MM:SS AM` at a fixed offset
pub fn format_timestamp(timestamp: i64, offset: FixedOffset) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| {
        dt.with_timezone(&offset)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow(slope: f64, scale: f64) -> TrendArrow {
        TrendArrow::new(Trend { slope, scale }, "red")
    }

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_flat_arrow() {
        let [shaft, upper, lower] = arrow(0.0, 10.0).segments();
        assert!(approx(shaft.from, (0.0, 50.0)));
        assert!(approx(shaft.to, (120.0, 50.0)));

        // Head strokes point back from the tip at +/- 30 degrees
        assert!(approx(upper.from, (120.0, 50.0)));
        assert!(upper.to.0 < 120.0 && lower.to.0 < 120.0);
        assert!((upper.to.1 + lower.to.1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rising_arrow_spans_canvas() {
        let [shaft, _, _] = arrow(5.0, 10.0).segments();
        assert!(approx(shaft.from, (0.0, 100.0)));
        assert!(approx(shaft.to, (120.0, 0.0)));
    }

    #[test]
    fn test_arrow_is_clamped() {
        assert_eq!(arrow(50.0, 10.0).segments(), arrow(5.0, 10.0).segments());
    }

    #[test]
    fn test_direction() {
        assert_eq!(arrow(2.0, 10.0).direction(), TrendDirection::Rising);
        assert_eq!(arrow(-0.3, 1.0).direction(), TrendDirection::Falling);
        assert_eq!(arrow(0.1, 10.0).direction(), TrendDirection::Steady);
    }

    #[test]
    fn test_svg_path() {
        let path = arrow(0.0, 10.0).svg_path();
        assert!(path.starts_with("M 0.0 50.0 L 120.0 50.0"));
        assert_eq!(path.matches('M').count(), 3);
    }

    #[test]
    fn test_panel_text() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let panel = SummaryPanel {
            name: "Temperature".to_string(),
            units: "C".to_string(),
            color: "red".to_string(),
            latest: Some(LatestReading {
                value: 20.5,
                index: 2,
                timestamp: 300,
            }),
            mean: Some(20.3),
            arrow: None,
            utc_offset: utc,
        };

        assert_eq!(panel.latest_text(), "20.5 C");
        assert_eq!(panel.mean_text(), "14-day Avg: 20.30 C");
        assert_eq!(panel.latest_time_text().as_deref(), Some("1/1/1970, 12:05:00 AM"));
    }

    #[test]
    fn test_panel_without_data() {
        let panel = SummaryPanel {
            name: "pH".to_string(),
            units: String::new(),
            color: "purple".to_string(),
            latest: None,
            mean: None,
            arrow: None,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
        };

        assert_eq!(panel.latest_text(), "no data");
        assert_eq!(panel.mean_text(), "14-day Avg: no data");
        assert_eq!(panel.latest_time_text(), None);
    }

    #[test]
    fn test_format_timestamp_offset() {
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(
            format_timestamp(0, pacific).as_deref(),
            Some("12/31/1969, 5:00:00 PM")
        );
    }
}
