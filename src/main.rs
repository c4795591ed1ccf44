//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geo_validator` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing the JSON report
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geo_validator::config::MAPBOX_TOKEN_ENV;
use geo_validator::initialization::init_logger_with;
use geo_validator::{Config, LogFormat, LogLevel, Validator};

/// Validate the geographic metadata of an HTML page.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opt {
    /// URL of the page to validate
    url: String,

    /// Access token for the geocoding service
    /// (falls back to the MAPBOX_ACCESS_TOKEN environment variable)
    #[arg(long, verbatim_doc_comment)]
    access_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_seconds: u64,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Logging level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting MAPBOX_ACCESS_TOKEN in .env without exporting it
    let _ = dotenvy::dotenv();

    let opt = Opt::parse();

    init_logger_with(opt.log_level.into(), opt.log_format)
        .context("Failed to initialize logger")?;

    let access_token = match opt.access_token {
        Some(token) => token,
        None => std::env::var(MAPBOX_TOKEN_ENV).unwrap_or_default(),
    };

    let config = Config {
        access_token,
        timeout_seconds: opt.timeout_seconds,
        ..Default::default()
    };

    let validator = Validator::new(&config).context("Failed to initialize validator")?;
    let report = validator.validate(&opt.url).await;

    let json = if opt.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{json}");

    if report.is_halted() {
        process::exit(1);
    }
    Ok(())
}
