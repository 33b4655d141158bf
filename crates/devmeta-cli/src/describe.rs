//! # Describe Subcommand
//!
//! Loads a descriptor and prints the normalized descriptor of the resulting
//! type tree (defaults filled in, names resolved).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use crate::input::load_schema;

/// Arguments for the `devmeta describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Data type descriptor (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,
}

pub fn describe(args: &DescribeArgs) -> Result<Value> {
    Ok(load_schema(&args.schema)?.describe())
}

/// Execute the describe subcommand.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    println!("{}", serde_json::to_string_pretty(&describe(args)?)?);
    Ok(0)
}
