//! Dashboard Document
//!
//! The JSON document the dashboard is drawn from: one shared `datetime`
//! axis and one entry per measured variable.
//!
//! - **types**: `StationDocument` and `VariableData` with nullable samples
//! - **source**: Loading a document from a local file or over HTTP
//! - **error**: Error types

pub mod error;
pub mod source;
pub mod types;

pub use error::{DocumentError, DocumentResult};
pub use source::{source_for, DocumentSource, FileSource, HttpSource};
pub use types::{StationDocument, Trend, VariableData};
