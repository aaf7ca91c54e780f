//! # Planform CLI
//!
//! Loads an aircraft document, derives its geometry, optionally evaluates
//! longitudinal static stability, and prints or saves the populated document.
//!
//! Logs go to stderr; stdout carries only the requested output.

mod summary;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use planform_core::equations::EquationTracker;
use planform_core::file_io::{load_document, save_document};
use planform_core::{calculations, LongitudinalStability, SizingError, SizingResult};

#[derive(Parser)]
#[command(name = "planform")]
#[command(about = "Derive fixed-wing planform geometry and wing static stability", long_about = None)]
struct Args {
    /// Aircraft document (.yaml/.yml or .json)
    #[arg(default_value = "Aircraft.yaml")]
    config: PathBuf,

    /// Write the populated document here (format from extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Evaluate wing longitudinal static stability
    #[arg(short, long)]
    stability: bool,

    /// Print a human-readable summary instead of the document
    #[arg(long)]
    summary: bool,

    /// Print the equations applied during this run
    #[arg(long)]
    equations: bool,

    /// Print the populated document as JSON
    #[arg(long, conflicts_with = "summary")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Machine-readable output of one run.
#[derive(Serialize)]
struct Report<'a> {
    aircraft: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    stability: Option<&'a LongitudinalStability>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!(code = e.error_code(), field = e.field_path().as_deref(), "{}", e);
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        process::exit(1);
    }
}

fn run(args: &Args) -> SizingResult<()> {
    info!(path = %args.config.display(), "Loading aircraft document");
    let document = load_document(&args.config)?;

    let mut tracker = EquationTracker::new();
    let aircraft = calculations::derive_tracked(document.spec(), &mut tracker)?;
    let populated = document.populated(&aircraft)?;

    let stability = if args.stability {
        Some(calculations::stability::evaluate_tracked(&aircraft, &mut tracker)?)
    } else {
        None
    };

    if args.summary {
        print!("{}", summary::render(&aircraft, stability.as_ref()));
    } else if args.json {
        let report = Report {
            aircraft: &populated,
            stability: stability.as_ref(),
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| SizingError::serialization(e.to_string()))?;
        println!("{}", json);
    } else if args.output.is_none() {
        let yaml = serde_yaml::to_string(&populated)
            .map_err(|e| SizingError::serialization(e.to_string()))?;
        print!("{}", yaml);
    }

    if args.equations {
        println!();
        print!("{}", tracker.generate_usage_markdown());
    }

    if let Some(output) = &args.output {
        save_document(&populated, output)?;
    }

    debug!(
        equations = tracker.unique_equations().len(),
        applications = tracker.usages().len(),
        "Run complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_config_path() {
        let args = Args::parse_from(["planform"]);
        assert_eq!(args.config, PathBuf::from("Aircraft.yaml"));
        assert!(!args.stability);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["planform", "glider.json", "-s", "--summary", "-o", "out.yaml", "-v"]);
        assert_eq!(args.config, PathBuf::from("glider.json"));
        assert!(args.stability && args.summary && args.verbose);
        assert_eq!(args.output, Some(PathBuf::from("out.yaml")));
    }

    #[test]
    fn test_json_conflicts_with_summary() {
        assert!(Args::try_parse_from(["planform", "--json", "--summary"]).is_err());
    }
}
