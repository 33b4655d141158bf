//! # devmeta-types: Runtime Data Type Metadata
//!
//! Describes, validates, formats and converts dynamically-typed telemetry
//! values against a declared schema.
//!
//! ## Type Hierarchy
//!
//! Every schema node implements [`DataType`]: a stable id, a display name,
//! `validate`, `format` and `describe`. Nodes that normalize raw values also
//! expose the [`Converter`] capability through [`DataType::as_converter`].
//!
//! - [`primitive`]: leaf types (`string`, `int`, `long`, `double`,
//!   `boolean`, `date`, `enum`, `array`).
//! - [`PropertyMetadata`]: a named slot binding an id to a data type.
//! - [`ObjectType`]: the composite type. Validation is fail-fast over the
//!   declared properties; format and convert rebuild the mapping, leaving
//!   undeclared keys untouched.
//!
//! ## Schema Loading
//!
//! [`schema`] builds type trees from JSON/YAML descriptors; every
//! [`DataType::describe`] output loads back into an equivalent tree.
//!
//! ## Crate Policy
//!
//! - Validation mismatches are [`ValidationResult`] values, never errors.
//! - Shape mismatches in `format`/`convert` are `MetadataError::InvalidShape`
//!   for every composite type, with a `warn` trace event.
//! - Type trees are immutable once built and shared as `Arc<dyn DataType>`.

pub mod data_type;
pub mod object;
pub mod primitive;
pub mod property;
pub mod result;
pub mod schema;
pub mod unit;

pub use data_type::{convert_or_pass, Converter, DataType, DataTypeRef};
pub use object::ObjectType;
pub use property::PropertyMetadata;
pub use result::{ValidationResult, UNSUPPORTED_FORMAT};
pub use schema::{from_value, load_json, load_yaml, TypeDescriptor};
pub use unit::{builtin_unit, SymbolUnit, ValueUnit};
