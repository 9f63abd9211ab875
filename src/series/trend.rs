//! Trend analysis
//!
//! Weighted rolling means and the 14-day trend slope used for the dashboard
//! arrow. Series are assumed to be hourly.

use super::types::Sample;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window length for the slope smoother, in samples
pub const SLOPE_WINDOW: usize = 44;

/// Minimum valid samples in a window before the smoother emits a value
pub const SLOPE_MIN_PERIODS: usize = 20;

/// Hours in the period the slope is reported over (14 days)
pub const SLOPE_HORIZON_HOURS: f64 = 24.0 * 14.0;

/// Weighting applied across a rolling window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Equal weights
    #[default]
    Boxcar,
    /// Raised cosine, zero at both ends
    Hann,
    /// Raised cosine on a 0.08 pedestal
    Hamming,
}

impl WindowKind {
    /// Symmetric window weights of length `len`
    pub fn weights(&self, len: usize) -> Vec<f64> {
        if len <= 1 {
            return vec![1.0; len];
        }

        let denom = (len - 1) as f64;
        (0..len)
            .map(|n| {
                let phase = (2.0 * PI * n as f64 / denom).cos();
                match self {
                    WindowKind::Boxcar => 1.0,
                    WindowKind::Hann => 0.5 - 0.5 * phase,
                    WindowKind::Hamming => 0.54 - 0.46 * phase,
                }
            })
            .collect()
    }
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowKind::Boxcar => write!(f, "boxcar"),
            WindowKind::Hann => write!(f, "hann"),
            WindowKind::Hamming => write!(f, "hamming"),
        }
    }
}

/// Weighted rolling mean over a fixed window
///
/// A trailing window ends at the output index; a centered window starts
/// `window / 2` samples before it. Missing samples are skipped, and an output
/// is `None` when fewer than `min_periods` samples were present.
pub fn rolling_mean(
    samples: &[Sample],
    window: usize,
    kind: WindowKind,
    center: bool,
    min_periods: usize,
) -> Vec<Sample> {
    if window == 0 {
        return vec![None; samples.len()];
    }

    let weights = kind.weights(window);
    let min_periods = min_periods.max(1);

    (0..samples.len())
        .map(|i| {
            let start = if center {
                i as isize - (window / 2) as isize
            } else {
                i as isize + 1 - window as isize
            };

            let mut weighted = 0.0;
            let mut weight_total = 0.0;
            let mut count = 0;

            for (k, w) in weights.iter().enumerate() {
                let j = start + k as isize;
                if j < 0 || j as usize >= samples.len() {
                    continue;
                }
                if let Some(v) = samples[j as usize] {
                    weighted += w * v;
                    weight_total += w;
                    count += 1;
                }
            }

            if count >= min_periods && weight_total > 0.0 {
                Some(weighted / weight_total)
            } else {
                None
            }
        })
        .collect()
}

/// Ordinary least-squares line through `(x, y)` points
///
/// Returns `(slope, intercept)`, or `None` with fewer than two distinct x.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = x - mean_x;
        (sxy + dx * (y - mean_y), sxx + dx * dx)
    });

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Change over 14 days implied by an hourly series
///
/// The series is smoothed with a trailing Hann window, the warm-up outputs are
/// dropped, and a line is fit against sample index. The per-hour slope is
/// scaled to the 14-day horizon.
///
/// Only the first `SLOPE_MIN_PERIODS` outputs are dropped, so the partial
/// windows at indices 20..43 stay in the fit.
pub fn trend_slope(samples: &[Sample]) -> Option<f64> {
    let smoothed = rolling_mean(
        samples,
        SLOPE_WINDOW,
        WindowKind::Hann,
        false,
        SLOPE_MIN_PERIODS,
    );

    let points: Vec<(f64, f64)> = smoothed
        .iter()
        .skip(SLOPE_MIN_PERIODS)
        .enumerate()
        .filter_map(|(x, y)| y.map(|y| (x as f64, y)))
        .collect();

    let (slope, _) = linear_fit(&points)?;
    tracing::trace!(points = points.len(), slope, "Fitted hourly trend");
    Some(slope * SLOPE_HORIZON_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_window_weights() {
        let hann = WindowKind::Hann.weights(3);
        assert!(approx(hann[0], 0.0) && approx(hann[1], 1.0) && approx(hann[2], 0.0));

        let hamming = WindowKind::Hamming.weights(3);
        assert!(approx(hamming[0], 0.08) && approx(hamming[1], 1.0));

        assert_eq!(WindowKind::Boxcar.weights(4), vec![1.0; 4]);
        assert_eq!(WindowKind::Hann.weights(1), vec![1.0]);
    }

    #[test]
    fn test_trailing_boxcar() {
        let samples = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let rolled = rolling_mean(&samples, 3, WindowKind::Boxcar, false, 3);
        assert_eq!(rolled, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_centered_boxcar() {
        let samples = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let rolled = rolling_mean(&samples, 3, WindowKind::Boxcar, true, 1);
        assert_eq!(rolled, vec![Some(1.5), Some(2.0), Some(3.0), Some(3.5)]);
    }

    #[test]
    fn test_rolling_skips_missing() {
        let samples = [Some(1.0), None, Some(3.0)];
        let rolled = rolling_mean(&samples, 3, WindowKind::Boxcar, false, 2);
        assert_eq!(rolled, vec![None, None, Some(2.0)]);

        let rolled = rolling_mean(&samples, 3, WindowKind::Boxcar, false, 3);
        assert_eq!(rolled, vec![None, None, None]);
    }

    #[test]
    fn test_linear_fit() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (slope, intercept) = linear_fit(&points).unwrap();
        assert!(approx(slope, 2.0));
        assert!(approx(intercept, 1.0));

        assert_eq!(linear_fit(&[(1.0, 1.0)]), None);
        assert_eq!(linear_fit(&[(1.0, 1.0), (1.0, 2.0)]), None);
    }

    #[test]
    fn test_trend_slope_on_ramp() {
        // 0.1 units per hour is 33.6 units per 14 days
        let samples: Vec<Sample> = (0..500).map(|i| Some(0.1 * i as f64)).collect();
        let slope = trend_slope(&samples).unwrap();
        assert!((slope - 33.6).abs() / 33.6 < 0.01, "slope: {}", slope);
    }

    #[test]
    fn test_trend_slope_flat_and_short() {
        let flat: Vec<Sample> = vec![Some(8.1); 200];
        assert!(trend_slope(&flat).unwrap().abs() < 1e-6);

        let short: Vec<Sample> = vec![Some(1.0); 10];
        assert_eq!(trend_slope(&short), None);

        let missing: Vec<Sample> = vec![None; 200];
        assert_eq!(trend_slope(&missing), None);
    }

    #[test]
    fn test_trend_slope_keeps_partial_windows() {
        // Shorter than one full window: only the partial outputs at 20 and 21 exist
        let samples: Vec<Sample> = (0..22).map(|i| Some(0.1 * i as f64)).collect();
        let slope = trend_slope(&samples).unwrap();
        assert!(slope > 0.0, "slope: {}", slope);
    }
}
