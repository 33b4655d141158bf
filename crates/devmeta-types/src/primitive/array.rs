//! The `array` data type: an ordered sequence of a single element type.

use devmeta_core::{MetadataError, ValueKind};
use serde_json::{json, Map, Value};

use crate::data_type::{convert_or_pass, Converter, DataType, DataTypeRef};
use crate::result::ValidationResult;

/// Sequence of values, optionally constrained to an element type.
///
/// Without an element type any sequence is accepted and passed through
/// untouched by `format` and `convert`.
#[derive(Debug, Clone, Default)]
pub struct ArrayType {
    element_type: Option<DataTypeRef>,
}

impl ArrayType {
    pub const ID: &'static str = "array";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(element_type: DataTypeRef) -> Self {
        Self {
            element_type: Some(element_type),
        }
    }

    pub fn element_type(&self) -> Option<&DataTypeRef> {
        self.element_type.as_ref()
    }

    fn map_elements<F>(&self, items: &[Value], mapping: F) -> Result<Value, MetadataError>
    where
        F: Fn(&dyn DataType, &Value) -> Result<Value, MetadataError>,
    {
        let Some(element_type) = &self.element_type else {
            return Ok(Value::Array(items.to_vec()));
        };
        let mapped = items
            .iter()
            .map(|item| match item {
                Value::Null => Ok(Value::Null),
                _ => mapping(element_type.as_ref(), item),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(mapped))
    }
}

impl DataType for ArrayType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Array"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        let Value::Array(items) = value else {
            return ValidationResult::unsupported_format();
        };
        let Some(element_type) = &self.element_type else {
            return ValidationResult::success();
        };
        for (index, item) in items.iter().enumerate() {
            let result = element_type.validate(item);
            if let Some(reason) = result.reason() {
                return ValidationResult::fail(format!("[{index}]: {reason}"));
            }
        }
        ValidationResult::success()
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => self.map_elements(items, |ty, item| ty.format(item)),
            other => {
                tracing::warn!(type_id = Self::ID, found = %ValueKind::of(other), "unsupported array value");
                Err(MetadataError::invalid_shape(Self::ID, ValueKind::Array, other))
            }
        }
    }

    fn as_converter(&self) -> Option<&dyn Converter> {
        Some(self)
    }

    fn describe(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!(Self::ID));
        if let Some(element_type) = &self.element_type {
            out.insert("elementType".into(), element_type.describe());
        }
        Value::Object(out)
    }
}

impl Converter for ArrayType {
    /// Sequences are converted element-wise. A string holding a JSON array
    /// is parsed first.
    fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => self.map_elements(items, convert_or_pass),
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => self.map_elements(&items, convert_or_pass),
                _ => Err(MetadataError::conversion(Self::ID, value, "not a JSON array")),
            },
            other => Err(MetadataError::conversion(
                Self::ID,
                other,
                format!("cannot convert {} to array", ValueKind::of(other)),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{IntType, StringType};
    use std::sync::Arc;

    #[test]
    fn test_validate_elements_fail_fast_with_index() {
        let ints = ArrayType::of(Arc::new(IntType::new()));
        assert!(ints.validate(&json!([1, "2", 3])).is_success());
        assert_eq!(
            ints.validate(&json!([1, "x", "y"])).reason(),
            Some(r#"[1]: invalid int value: "x""#)
        );
    }

    #[test]
    fn test_validate_requires_sequence() {
        let result = ArrayType::new().validate(&json!({"a": 1}));
        assert_eq!(result.reason(), Some("unsupported format"));
        assert!(ArrayType::new().validate(&json!([{"any": "thing"}])).is_success());
    }

    #[test]
    fn test_convert_element_wise() {
        let ints = ArrayType::of(Arc::new(IntType::new()));
        assert_eq!(ints.convert(&json!(["1", 2, null])).unwrap(), json!([1, 2, null]));
        assert_eq!(ints.convert(&json!("[\"4\", 5]")).unwrap(), json!([4, 5]));
        assert!(ints.convert(&json!(["x"])).is_err());
        assert!(ints.convert(&json!(5)).is_err());
    }

    #[test]
    fn test_convert_without_element_capability_passes_through() {
        let strings = ArrayType::of(Arc::new(StringType));
        assert_eq!(strings.convert(&json!([1, "a"])).unwrap(), json!([1, "a"]));
    }

    #[test]
    fn test_format_rejects_non_sequence() {
        let err = ArrayType::new().format(&json!("abc")).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidShape { .. }));
        assert_eq!(ArrayType::new().format(&Value::Null).unwrap(), Value::Null);
    }
}
