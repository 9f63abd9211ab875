//! Document error types
//!
//! Every failure to obtain or interpret a dashboard document is explicit;
//! nothing is swallowed on the way to the renderer.

use crate::series::SeriesError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or reading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Local file could not be read or written
    #[error("Failed to access document {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Host could not be reached
    #[error("Document server unavailable: {0}")]
    Unavailable(String),

    /// Body is not a valid dashboard document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested variable is not in the document
    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    /// Entry is present but is not valid variable data
    #[error("Invalid variable {name}: {error}")]
    InvalidVariable { name: String, error: String },

    /// Variable data violates a series invariant
    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Parse(err.to_string())
    }
}

/// Result type alias for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
