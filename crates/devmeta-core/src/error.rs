//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout devmeta. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Semantic mismatches found by `validate` are NOT errors; they are
//!   reported as validation results and never reach this module.
//! - Shape mismatches during `format`/`convert` carry the type id, the
//!   expected shape and the shape actually found.
//! - Codec errors wrap the underlying `serde_json` or `serde_yaml` error.

use thiserror::Error;

use crate::kind::ValueKind;

/// Top-level error type for devmeta.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// A value of the wrong shape was handed to a transforming operation.
    #[error("unsupported {found} value for type '{type_id}': expected {expected}")]
    InvalidShape {
        /// Id of the data type that rejected the value.
        type_id: String,
        /// Shape the data type accepts.
        expected: ValueKind,
        /// Shape that was actually supplied.
        found: ValueKind,
    },

    /// A value could not be normalized into the type's canonical representation.
    #[error("cannot convert {value} to '{type_id}': {reason}")]
    Conversion {
        /// Id of the data type performing the conversion.
        type_id: String,
        /// Compact rendering of the offending value.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// A schema descriptor is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A validation result was lifted into an error.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Encoding or decoding a payload failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl MetadataError {
    /// Build an [`MetadataError::InvalidShape`] for `value`.
    pub fn invalid_shape(
        type_id: impl Into<String>,
        expected: ValueKind,
        value: &serde_json::Value,
    ) -> Self {
        Self::InvalidShape {
            type_id: type_id.into(),
            expected,
            found: ValueKind::of(value),
        }
    }

    /// Build a [`MetadataError::Conversion`] for `value`.
    pub fn conversion(
        type_id: impl Into<String>,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            type_id: type_id.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error at the wire codec boundary.
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON serialization or parsing failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization or parsing failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The YAML payload uses a feature outside the JSON value model.
    #[error("unsupported YAML: {0}")]
    UnsupportedYaml(String),

    /// The payload parsed, but not into the shape the codec produces.
    #[error("expected {expected} payload, found {found}")]
    UnexpectedShape {
        /// Shape the codec produces.
        expected: ValueKind,
        /// Shape the payload decoded to.
        found: ValueKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_shape_message() {
        let err = MetadataError::invalid_shape("object", ValueKind::Object, &json!(42));
        assert_eq!(
            err.to_string(),
            "unsupported number value for type 'object': expected object"
        );
    }

    #[test]
    fn test_conversion_message_renders_value_compactly() {
        let err = MetadataError::conversion("int", &json!("abc"), "not an integer");
        assert_eq!(
            err.to_string(),
            r#"cannot convert "abc" to 'int': not an integer"#
        );
    }

    #[test]
    fn test_codec_error_converts_into_metadata_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MetadataError = CodecError::from(parse_err).into();
        assert!(matches!(err, MetadataError::Codec(CodecError::Json(_))));
    }
}
