//! The `string` data type.

use devmeta_core::MetadataError;
use serde_json::{json, Value};

use crate::data_type::DataType;
use crate::result::ValidationResult;

/// Free-form text. Accepts every value; has no conversion capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl StringType {
    pub const ID: &'static str = "string";

    pub fn new() -> Self {
        Self
    }
}

impl DataType for StringType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "String"
    }

    fn validate(&self, _value: &Value) -> ValidationResult {
        ValidationResult::success()
    }

    /// Scalars are rendered as strings; `null` and containers are unchanged.
    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        Ok(match value {
            Value::Bool(b) => Value::String(b.to_string()),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => value.clone(),
        })
    }

    fn describe(&self) -> Value {
        json!({"type": Self::ID})
    }
}
