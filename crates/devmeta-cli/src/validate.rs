//! # Validate Subcommand
//!
//! Validates a telemetry document against a data type descriptor and prints
//! the result.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use devmeta_types::ValidationResult;

use crate::input::{load_schema, read_document};

/// Arguments for the `devmeta validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Data type descriptor (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Print the result as JSON instead of `OK` / `FAIL: <reason>`.
    #[arg(long)]
    pub json: bool,

    /// Telemetry document to validate (JSON or YAML).
    #[arg(value_name = "VALUE")]
    pub value: PathBuf,
}

/// Validate the document named by `args`.
pub fn validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let data_type = load_schema(&args.schema)?;
    let value = read_document(&args.value)?;
    Ok(data_type.validate(&value))
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let result = validate(args)?;

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{result}");
    }

    if result.is_success() {
        Ok(0)
    } else {
        tracing::debug!(value = %args.value.display(), "document failed validation");
        Ok(1)
    }
}
