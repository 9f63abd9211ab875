//! # Buoydash
//!
//! Buoy Dashboard - summarize and chart environmental sensor time series
//! from CeNCOOS ERDDAP stations.
//!
//! ## Features
//!
//! - **Reductions**: Mean and latest-valid readings over nullable series
//! - **Trends**: Hann-smoothed least-squares slopes drawn as arrows
//! - **Dashboards**: uPlot chart options and summary panels, one per variable
//! - **ERDDAP**: Build dashboard documents straight from station feeds
//!
//! ## Modules
//!
//! - [`series`]: Time-series model, reductions and trends
//! - [`document`]: Dashboard document format and sources
//! - [`dashboard`]: Chart and panel construction, HTML/text rendering
//! - [`erddap`]: Station parameters, CSV ingest and document writer
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use buoydash::document::source_for;
//! use buoydash::dashboard::{build_dashboard, render_text, BuildOptions};
//! use buoydash::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::load_default()?;
//!
//!     let source = source_for(&config.dashboard.source, config.fetch.timeout())?;
//!     let doc = source.fetch().await?;
//!
//!     let dashboard = build_dashboard(
//!         &doc,
//!         &BuildOptions {
//!             variables: &config.dashboard.variables,
//!             style: &config.chart,
//!             utc_offset: config.utc_offset(),
//!             title: &config.dashboard.title,
//!         },
//!     );
//!
//!     print!("{}", render_text(&dashboard));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dashboard;
pub mod document;
pub mod erddap;
pub mod series;

// Re-export top-level types for convenience
pub use series::{
    compute_mean, find_latest_valid, trend_slope, Latest, LatestReading, Sample, SeriesError,
    SeriesResult, TimeSeries, WindowKind,
};

pub use document::{
    source_for, DocumentError, DocumentResult, DocumentSource, FileSource, HttpSource,
    StationDocument, Trend, VariableData,
};

pub use dashboard::{
    build_dashboard, render_html, render_text, BuildOptions, Chart, ChartConfig, ChartStyle,
    Dashboard, SummaryPanel, TrackedVariable, TrendArrow, VariableOutcome, VariableSummary,
};

pub use erddap::{ErddapClient, ErddapError, ErddapResult, StationParams};

pub use config::{Config, ConfigError, LoggingConfig};
