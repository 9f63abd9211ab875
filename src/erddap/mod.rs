//! ERDDAP Station Feeds
//!
//! Builds dashboard documents from CeNCOOS ERDDAP tabledap feeds:
//!
//! - **params**: Station parameter files and request URLs
//! - **ingest**: `.csvp` parsing, hourly resampling and fill-to-present
//! - **writer**: Assembling and writing the dashboard document
//! - **client**: HTTP download tying the steps together
//!
//! # Pipeline
//!
//! ```text
//! params.json → URL → CSV → hourly means → 14-day grid → slopes → station.json
//! ```

pub mod client;
pub mod error;
pub mod ingest;
pub mod params;
pub mod writer;

pub use client::ErddapClient;
pub use error::{ErddapError, ErddapResult};
pub use ingest::{fill_to_present, parse_csv, resample_hourly, Column, Observations};
pub use params::{DataVariable, StationParams, DEFAULT_BASE_URL};
pub use writer::{build_document, write_document, ROLLING_WINDOW};
