//! Series reductions
//!
//! Pure, synchronous reductions over a slice of samples. Missing samples are
//! excluded from every computation; an input with no valid samples reduces to
//! `None` rather than a sentinel value.

use super::types::{Latest, Sample};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Count the non-missing samples
pub fn count_valid(samples: &[Sample]) -> usize {
    samples.iter().filter(|s| s.is_some()).count()
}

/// Mean of the non-missing samples, rounded to 2 decimal places
///
/// Returns `None` when no sample is present; callers treat that as "no data".
pub fn compute_mean(samples: &[Sample]) -> Option<f64> {
    let (total, count) = samples
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));

    if count == 0 {
        return None;
    }

    Some(round_to(total / count as f64, 2))
}

/// Last non-missing sample, scanning backward from the end
pub fn find_latest_valid(samples: &[Sample]) -> Option<Latest> {
    samples
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, sample)| sample.map(|value| Latest { value, index }))
}
