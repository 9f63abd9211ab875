//! Buoydash Series
//!
//! This module provides the time-series model and its reductions:
//!
//! - **types**: Core data structures (Sample, TimeSeries, Latest)
//! - **reduce**: Mean and latest-valid reductions
//! - **trend**: Weighted rolling means and 14-day trend slopes
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use buoydash::series::{compute_mean, find_latest_valid, TimeSeries};
//!
//! let series = TimeSeries::new("Temperature", "C", vec![100, 200, 300], vec![Some(20.1), None, Some(20.5)])
//!     .unwrap();
//!
//! assert_eq!(compute_mean(series.samples()), Some(20.3));
//! let latest = find_latest_valid(series.samples()).unwrap();
//! assert_eq!((latest.value, latest.index), (20.5, 2));
//! ```

pub mod error;
pub mod reduce;
pub mod trend;
pub mod types;

// Re-export commonly used types
pub use error::{SeriesError, SeriesResult};
pub use reduce::{compute_mean, count_valid, find_latest_valid, round_to};
pub use trend::{linear_fit, rolling_mean, trend_slope, WindowKind};
pub use types::{Latest, LatestReading, Sample, TimeSeries};
