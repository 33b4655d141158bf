//! # Data Type and Converter Capabilities
//!
//! Every schema node, scalar or composite, implements [`DataType`]. Callers
//! validate, format and describe values without knowing the concrete variant.
//!
//! Conversion is a separate capability. A type that needs to normalize raw
//! values into a canonical representation implements [`Converter`] and
//! advertises it through [`DataType::as_converter`]. Types that do not
//! advertise it are identity conversions: composites pass their values
//! through untouched.
//!
//! Both traits require `Send + Sync`; type trees are built once and shared
//! behind `Arc` across threads without locking.

use std::fmt::Debug;
use std::sync::Arc;

use devmeta_core::MetadataError;
use serde_json::Value;

use crate::result::ValidationResult;

/// Shared handle to a data type node.
pub type DataTypeRef = Arc<dyn DataType>;

/// Polymorphic contract satisfied by every schema node.
pub trait DataType: Debug + Send + Sync {
    /// Stable identifier, unique per variant (e.g. `"object"`).
    fn id(&self) -> &str;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Check `value` against this type. Semantic mismatches are reported as
    /// failed results, never as panics.
    fn validate(&self, value: &Value) -> ValidationResult;

    /// Produce the display representation of `value`.
    fn format(&self, value: &Value) -> Result<Value, MetadataError>;

    /// The conversion capability, if this type normalizes values.
    fn as_converter(&self) -> Option<&dyn Converter> {
        None
    }

    /// Descriptor of this type in the form accepted by the schema loader.
    fn describe(&self) -> Value;
}

/// Normalizes raw values into a type's canonical representation.
pub trait Converter: Send + Sync {
    fn convert(&self, value: &Value) -> Result<Value, MetadataError>;
}

/// Convert `value` with `data_type`'s converter, or return it unchanged when
/// the type has no conversion capability.
pub fn convert_or_pass(data_type: &dyn DataType, value: &Value) -> Result<Value, MetadataError> {
    match data_type.as_converter() {
        Some(converter) => converter.convert(value),
        None => Ok(value.clone()),
    }
}
