//! # devmeta-cli: Device Metadata Command-Line Interface
//!
//! Runs the devmeta type system over documents on disk.
//!
//! ## Subcommands
//!
//! - `validate`: check a telemetry document against a type descriptor
//! - `format`: render a document for display
//! - `convert`: normalize a document into its canonical representation
//! - `describe`: print the normalized form of a type descriptor
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `devmeta-types`; no type logic lives here.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod describe;
pub mod input;
pub mod transform;
pub mod validate;
