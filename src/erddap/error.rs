//! ERDDAP error types

use crate::document::DocumentError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a document from an ERDDAP feed
#[derive(Error, Debug)]
pub enum ErddapError {
    /// Station parameter file could not be read or parsed
    #[error("Invalid station parameters {path:?}: {error}")]
    Params { path: PathBuf, error: String },

    /// Output file could not be written
    #[error("Failed to write {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// HTTP request failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// ERDDAP answered with a non-success status
    #[error("ERDDAP returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// ERDDAP could not be reached
    #[error("Trouble reaching the ERDDAP server at {0}")]
    Unavailable(String),

    /// CSV framing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Resulting document could not be serialized
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Result type alias for ERDDAP operations
pub type ErddapResult<T> = Result<T, ErddapError>;
