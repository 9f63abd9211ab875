//! Buoydash CLI
//!
//! Command-line interface for the buoy dashboard:
//! - Summarize a dashboard document
//! - Render it as an HTML page
//! - Build a document from an ERDDAP station feed
//! - Generate a default config file

use anyhow::{Context, Result};
use buoydash::config::{generate_default_config, Config, LoggingConfig};
use buoydash::dashboard::{build_dashboard, render_html, render_text, BuildOptions, Dashboard};
use buoydash::document::source_for;
use buoydash::erddap::{write_document, ErddapClient, StationParams};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "buoydash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize and chart buoy sensor time series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print latest value, mean and trend per variable
    Summary {
        /// Document path or URL (default: from config)
        source: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Render the dashboard as an HTML page
    Render {
        /// Document path or URL (default: from config)
        source: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a dashboard document from an ERDDAP station feed
    Build {
        /// Station parameter file
        params: PathBuf,
        /// Directory for `{erddap-id}.json`
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match cli.config.clone() {
        Some(path) => Config::load_with_env(&path).map(|config| (config, Some(path))),
        None => Config::load_default(),
    };

    let config = match loaded {
        Ok((config, path)) => {
            init_logging(&config.logging);
            match path {
                Some(path) => tracing::info!("Loaded config from {:?}", path),
                None => tracing::debug!("Using default config with environment overrides"),
            }
            config
        }
        Err(e) => {
            init_logging(&Config::from_env().logging);
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Buoydash v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run(cli.command, &config).await {
        tracing::error!("{:#}", error);
        std::process::exit(1);
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("buoydash={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Summary { source, format } => {
            let dashboard = load_dashboard(source, config).await?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&dashboard.summaries())?);
                }
                OutputFormat::Table => {
                    print!("{}", render_text(&dashboard));
                }
            }
        }

        Commands::Render { source, output } => {
            let dashboard = load_dashboard(source, config).await?;
            let html = render_html(&dashboard);

            match output {
                Some(path) => {
                    std::fs::write(&path, &html)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    tracing::info!("Dashboard written to {:?}", path);
                }
                None => {
                    print!("{}", html);
                }
            }
        }

        Commands::Build { params, out_dir } => {
            let params = StationParams::load(&params)?;
            let client = ErddapClient::new(&config.erddap.base_url, config.fetch.timeout())?;

            let doc = client
                .build_document(
                    &params,
                    &config.dashboard.variables,
                    Utc::now(),
                    config.erddap.fill_days,
                )
                .await
                .with_context(|| format!("failed to build document for {}", params.erddap_id))?;

            let path = write_document(&doc, &out_dir, &params.erddap_id)?;
            println!("Wrote {}", path.display());
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}

/// Fetch a document and build its dashboard; fetch failures are reported
async fn load_dashboard(source: Option<String>, config: &Config) -> Result<Dashboard> {
    let location = source.unwrap_or_else(|| config.dashboard.source.clone());
    let source = source_for(&location, config.fetch.timeout())?;

    let doc = source
        .fetch()
        .await
        .with_context(|| format!("failed to load dashboard document from {}", source.location()))?;

    let dashboard = build_dashboard(
        &doc,
        &BuildOptions {
            variables: &config.dashboard.variables,
            style: &config.chart,
            utc_offset: config.utc_offset(),
            title: &config.dashboard.title,
        },
    );

    tracing::info!(
        rendered = dashboard.rendered_count(),
        tracked = dashboard.variables.len(),
        "Dashboard built"
    );
    Ok(dashboard)
}
