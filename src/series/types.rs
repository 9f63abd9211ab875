//! Core data types for buoy time series
//!
//! This module defines the fundamental types used by the reducers:
//! - `Sample`: One measurement, or `None` when the sensor reported nothing
//! - `TimeSeries`: Samples aligned by index with their timestamps
//! - `Latest` / `LatestReading`: Result of the latest-valid reduction

use super::error::{SeriesError, SeriesResult};
use super::reduce::{compute_mean, count_valid, find_latest_valid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single measurement; `None` marks a missing sample
pub type Sample = Option<f64>;

/// Last non-missing sample of a series and its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Latest {
    pub value: f64,
    pub index: usize,
}

/// Latest sample joined with the timestamp at its index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatestReading {
    pub value: f64,
    pub index: usize,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

impl LatestReading {
    /// Timestamp as a UTC date-time, if representable
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// An immutable, validated time series for one measured variable
///
/// Invariants: `timestamps.len() == samples.len()`, timestamps are
/// ascending, and every present sample is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    units: String,
    timestamps: Vec<i64>,
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Create a series, checking length, order and finiteness
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        timestamps: Vec<i64>,
        samples: Vec<Sample>,
    ) -> SeriesResult<Self> {
        let name = name.into();

        if timestamps.len() != samples.len() {
            return Err(SeriesError::LengthMismatch {
                name,
                timestamps: timestamps.len(),
                samples: samples.len(),
            });
        }

        if let Some(pos) = timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(SeriesError::Unordered {
                name,
                index: pos + 1,
            });
        }

        if let Some(index) = samples
            .iter()
            .position(|s| s.map(|v| !v.is_finite()).unwrap_or(false))
        {
            return Err(SeriesError::NonFinite { name, index });
        }

        Ok(Self {
            name,
            units: units.into(),
            timestamps,
            samples,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of non-missing samples
    pub fn valid_count(&self) -> usize {
        count_valid(&self.samples)
    }

    /// Mean of valid samples rounded to 2 decimals, `None` when there are none
    pub fn mean(&self) -> Option<f64> {
        compute_mean(&self.samples)
    }

    /// Latest valid sample with its timestamp
    pub fn latest(&self) -> Option<LatestReading> {
        find_latest_valid(&self.samples).map(|latest| LatestReading {
            value: latest.value,
            index: latest.index,
            timestamp: self.timestamps[latest.index],
        })
    }

    /// Iterate `(timestamp, sample)` pairs in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (i64, Sample)> + '_ {
        self.timestamps
            .iter()
            .copied()
            .zip(self.samples.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_creation() {
        let series = TimeSeries::new(
            "Temperature",
            "C",
            vec![100, 200, 300],
            vec![Some(20.1), None, Some(20.5)],
        )
        .unwrap();

        assert_eq!(series.name(), "Temperature");
        assert_eq!(series.units(), "C");
        assert_eq!(series.len(), 3);
        assert_eq!(series.valid_count(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let result = TimeSeries::new("pH", "total scale", vec![1, 2, 3], vec![Some(8.0)]);
        assert!(matches!(
            result,
            Err(SeriesError::LengthMismatch {
                timestamps: 3,
                samples: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_unordered_timestamps() {
        let result = TimeSeries::new("pH", "", vec![1, 3, 2], vec![None, None, None]);
        assert!(matches!(result, Err(SeriesError::Unordered { index: 2, .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = TimeSeries::new("pH", "", vec![1, 2], vec![Some(f64::NAN), None]);
        assert!(matches!(result, Err(SeriesError::NonFinite { index: 0, .. })));
    }

    #[test]
    fn test_latest_reading_joins_timestamp() {
        let series = TimeSeries::new(
            "Temperature",
            "C",
            vec![100, 200, 300],
            vec![Some(20.1), None, Some(20.5)],
        )
        .unwrap();

        let latest = series.latest().unwrap();
        assert_eq!(latest.value, 20.5);
        assert_eq!(latest.index, 2);
        assert_eq!(latest.timestamp, 300);
        assert_eq!(latest.datetime().unwrap().timestamp(), 300);
        assert_eq!(series.mean(), Some(20.3));
    }

    #[test]
    fn test_empty_series() {
        let series = TimeSeries::new("pH", "", vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.mean(), None);
        assert_eq!(series.latest(), None);
    }
}
