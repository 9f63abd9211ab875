//! Series error types

use thiserror::Error;

/// Errors that can occur when assembling a time series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Sample and timestamp sequences differ in length
    #[error("Length mismatch for {name}: {timestamps} timestamps but {samples} samples")]
    LengthMismatch {
        name: String,
        timestamps: usize,
        samples: usize,
    },

    /// Timestamps are not in ascending order
    #[error("Timestamps for {name} are not ascending at index {index}")]
    Unordered { name: String, index: usize },

    /// A sample is present but not a finite number
    #[error("Non-finite sample in {name} at index {index}")]
    NonFinite { name: String, index: usize },
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;
