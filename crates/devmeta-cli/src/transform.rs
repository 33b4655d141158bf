//! # Format and Convert Subcommands
//!
//! Both read a descriptor and a document, run one transformation, and print
//! the resulting document as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use devmeta_core::{Codec, JsonCodec};
use devmeta_types::convert_or_pass;
use serde_json::Value;

use crate::input::{load_schema, read_document};

/// Which transformation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Display representation.
    Format,
    /// Canonical representation.
    Convert,
}

impl Transform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Convert => "convert",
        }
    }
}

/// Arguments shared by `devmeta format` and `devmeta convert`.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Data type descriptor (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,

    /// Telemetry document to transform (JSON or YAML).
    #[arg(value_name = "VALUE")]
    pub value: PathBuf,
}

/// Apply `which` to the document named by `args`.
pub fn transform(args: &TransformArgs, which: Transform) -> Result<Value> {
    let data_type = load_schema(&args.schema)?;
    let value = read_document(&args.value)?;
    let out = match which {
        Transform::Format => data_type.format(&value),
        Transform::Convert => convert_or_pass(data_type.as_ref(), &value),
    };
    out.with_context(|| format!("cannot {} {}", which.as_str(), args.value.display()))
}

/// Execute `devmeta format` or `devmeta convert`.
pub fn run_transform(args: &TransformArgs, which: Transform) -> Result<u8> {
    let out = transform(args, which)?;
    let rendered = if args.compact {
        String::from_utf8(JsonCodec.encode(&out)?)?
    } else {
        serde_json::to_string_pretty(&out)?
    };
    println!("{rendered}");
    Ok(0)
}
