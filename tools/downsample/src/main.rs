//! downsample - Reduce long measurement files to a fixed number of points
//!
//! Reads a two-column series (timestamp, value), collapses it window by window
//! with the outlier-aware weighted average from `voltage-downsample`, and
//! writes a `Time,Simplified_Power` file.

mod codec;
mod config;
mod error;
mod logging;
mod pipeline;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::debug;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "downsample")]
#[command(about = "Reduce a measurement series to representative points")]
#[command(long_about = "Reduce a measurement series to representative points

Input: one header line, then `timestamp value` per line (whitespace or comma separated).
Output: `Time,Simplified_Power` with six fractional digits.

Examples:
  downsample                                # Etest.csv -> Etest_processed.csv, 100 points
  downsample power.csv -n 500               # power.csv -> power_processed.csv
  downsample power.csv -o out.csv --parallel
  downsample -c downsample.yaml             # settings from file, DOWNSAMPLE_* env applies too")]
#[command(version)]
struct Cli {
    /// Series file to read (default: Etest.csv)
    input: Option<PathBuf>,

    /// Output file (default: <input stem>_processed.csv beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Desired number of output points (default: 100)
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Reduce windows on all CPU cores
    #[arg(short, long)]
    parallel: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long = "config")]
    config: Option<PathBuf>,

    /// Log level or filter spec (e.g. "debug", "info,voltage_downsample=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else {
            self.log_level.clone()
        };

        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            points: self.points,
            // Only an explicit flag overrides file/env settings
            parallel: self.parallel.then_some(true),
            log_level,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings =
        config::load(cli.config.as_deref(), &cli.overrides()).context("Failed to load settings")?;

    logging::init(&settings.log_level).context("Failed to initialize logging")?;
    debug!(?settings, "settings loaded");

    let summary = pipeline::run(&settings).with_context(|| {
        format!(
            "Failed to downsample {} into {}",
            settings.input.display(),
            settings.output_path().display()
        )
    })?;

    println!(
        "{} Data processing and simplification completed: {} ({} samples) -> {} ({} points)",
        "✓".green(),
        summary.input.display(),
        summary.samples.to_string().bright_cyan(),
        summary.output.display(),
        summary.points.to_string().bright_cyan()
    );

    Ok(())
}
