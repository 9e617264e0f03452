//! # baserr probe
//!
//! Routes errors from the demonstration family through a configured catch
//! table and reports which clause caught each one.
//!
//! # Usage
//!
//! ```bash
//! # Run the bundled probe file (from the workspace root)
//! baserr_probe
//!
//! # Verbose logging (shows which clause fired)
//! baserr_probe -c probe.toml -v
//!
//! # Machine-readable report on stdout
//! baserr_probe -c probe.toml --report-json
//! ```

#![deny(warnings)]

use baserr_probe::config::{ConfigError, ConfigLoader, LogLevel, ProbeConfig};
use baserr_probe::probe::{self, ProbeReport};
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Bundled probe file, relative to the workspace root.
const DEFAULT_CONFIG: &str = "baserr_probe/config/probe.toml";

/// baserr probe - catch-by-ancestor probe harness
#[derive(Parser, Debug)]
#[command(name = "baserr_probe")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Routes a demonstration error family through configured catch tables")]
#[command(long_about = None)]
struct Args {
    /// Path to the probe file, relative to the working directory.
    /// The default is the bundled file as seen from the workspace root.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Enable verbose logging (overrides the configured level with DEBUG)
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    report_json: bool,
}

/// Errors that end a probe run.
#[derive(Debug, Error)]
enum ProbeError {
    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("{failed} of {total} probes failed")]
    Failed { failed: usize, total: usize },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        eprintln!("baserr_probe: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), ProbeError> {
    let args = Args::parse();

    let config = ProbeConfig::load(&args.config)
        .and_then(|config| config.validate().map(|()| config))
        .map_err(|source| ProbeError::Config {
            path: args.config.clone(),
            source,
        })?;

    setup_tracing(&args, config.shared.log_level);

    info!(
        "baserr probe v{} starting: {} probes, catch order {:?}",
        env!("CARGO_PKG_VERSION"),
        config.probes.len(),
        config.catch_order
    );

    let report = probe::run(&config);
    print_report(&args, &report)?;

    if report.all_passed() {
        Ok(())
    } else {
        Err(ProbeError::Failed {
            failed: report.failures(),
            total: report.outcomes.len(),
        })
    }
}

fn print_report(args: &Args, report: &ProbeReport) -> Result<(), ProbeError> {
    if args.report_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for outcome in &report.outcomes {
        let caught = outcome
            .caught_by
            .map_or("nothing", |target| target.as_str());
        let mark = if outcome.passed { "ok  " } else { "FAIL" };
        println!(
            "{mark} {:<24} caught by {:<14} lineage: {}",
            outcome.name,
            caught,
            outcome.lineage.join(" <- ")
        );
    }
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and the configured level.
///
/// Logs go to stderr so the report on stdout stays parseable.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
