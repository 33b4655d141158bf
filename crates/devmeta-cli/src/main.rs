//! # devmeta CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use devmeta_cli::describe::{run_describe, DescribeArgs};
use devmeta_cli::transform::{run_transform, Transform, TransformArgs};
use devmeta_cli::validate::{run_validate, ValidateArgs};

/// devmeta: device telemetry type metadata.
///
/// Validates, formats and converts telemetry documents against declarative
/// data type descriptors.
#[derive(Parser, Debug)]
#[command(name = "devmeta", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a descriptor.
    Validate(ValidateArgs),

    /// Render a document for display.
    Format(TransformArgs),

    /// Normalize a document into its canonical representation.
    Convert(TransformArgs),

    /// Print the normalized form of a descriptor.
    Describe(DescribeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Format(args) => run_transform(&args, Transform::Format),
        Commands::Convert(args) => run_transform(&args, Transform::Convert),
        Commands::Describe(args) => run_describe(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
