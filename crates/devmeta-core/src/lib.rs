//! # devmeta-core: Foundational Types for Device Metadata
//!
//! This crate is the leaf of the devmeta workspace. It defines the vocabulary
//! every other crate shares when talking about dynamically-typed telemetry
//! values, and the boundary through which those values enter and leave the
//! type system.
//!
//! ## Key Design Principles
//!
//! 1. **One dynamic value model.** Telemetry payloads are `serde_json::Value`
//!    trees. Every recursion site matches on the six variants exhaustively;
//!    [`ValueKind`] names those variants for diagnostics.
//!
//! 2. **Validation failures are values, errors are errors.** A value that does
//!    not satisfy its schema is reported through a validation result (see
//!    `devmeta-types`). [`MetadataError`] is reserved for operations that
//!    cannot produce a result at all: shape mismatches during transformation,
//!    unconvertible values, malformed schemas, codec failures.
//!
//! 3. **The codec owns the bytes.** [`JsonCodec`] and [`JsonArrayCodec`]
//!    delegate to `serde_json`; [`YamlCodec`] maps YAML onto the same value
//!    model. The type system never sees bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `devmeta-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codec;
pub mod error;
pub mod kind;

// Re-export primary types for ergonomic imports.
pub use codec::{Codec, JsonArrayCodec, JsonCodec, YamlCodec};
pub use error::{CodecError, MetadataError};
pub use kind::ValueKind;
