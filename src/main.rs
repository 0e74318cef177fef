//! VALUEBET: value-edge analysis and accumulator composition for sports odds
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads a slate of fixtures with odds from JSON, runs the pipeline for
//! one subscription tier and prints the report as JSON on stdout.
//!
//! Usage: `valuebet <fixtures.json> [tier] [--config <path>]`

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::{info, warn};

use valuebet::cli::Cli;
use valuebet::config::AppConfig;
use valuebet::{FixtureOdds, ValueEngine};

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cli = Cli::parse();
    let tier = cli.tier;
    let path = cli.fixtures.display().to_string();

    let cfg = match &cli.config {
        Some(config_path) => AppConfig::load(config_path)?,
        None => AppConfig::load_or_default()?,
    };

    let contents = fs::read_to_string(&cli.fixtures)
        .with_context(|| format!("Failed to read fixtures file: {path}"))?;
    let request: Vec<FixtureOdds> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse fixtures file: {path}"))?;

    if request.is_empty() {
        warn!(path = %path, "Fixtures file is empty");
    }
    info!(fixtures = request.len(), tier = %tier, "VALUEBET starting");

    let engine = ValueEngine::new(&cfg);
    let report = engine.run(&request, tier);

    for acc in &report.accumulators {
        info!(id = %acc.id, "{acc}");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so stdout stays
/// valid JSON.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("valuebet=info"));

    let json_logging = std::env::var("VALUEBET_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
