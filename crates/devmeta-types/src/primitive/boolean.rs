//! The `boolean` data type.
//!
//! Devices report switches in many encodings (`true`, `"on"`, `1`). A
//! `BooleanType` recognizes JSON booleans plus the configured true/false
//! values, and formats them with configurable display text.

use devmeta_core::MetadataError;
use serde_json::{json, Value};

use crate::data_type::{Converter, DataType};
use crate::result::ValidationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanType {
    true_value: String,
    false_value: String,
    true_text: String,
    false_text: String,
}

impl Default for BooleanType {
    fn default() -> Self {
        Self {
            true_value: "true".into(),
            false_value: "false".into(),
            true_text: "true".into(),
            false_text: "false".into(),
        }
    }
}

impl BooleanType {
    pub const ID: &'static str = "boolean";

    pub fn new() -> Self {
        Self::default()
    }

    /// Raw values (compared by their string form) that mean `true` and `false`.
    pub fn with_values(mut self, true_value: impl Into<String>, false_value: impl Into<String>) -> Self {
        self.true_value = true_value.into();
        self.false_value = false_value.into();
        self
    }

    /// Display text produced by `format`.
    pub fn with_text(mut self, true_text: impl Into<String>, false_text: impl Into<String>) -> Self {
        self.true_text = true_text.into();
        self.false_text = false_text.into();
        self
    }

    fn has_default_values(&self) -> bool {
        self.true_value == "true" && self.false_value == "false"
    }

    /// Interpret `value` as a boolean, if it is one of the recognized encodings.
    ///
    /// The numbers `1` and `0` are recognized only while the default
    /// `"true"`/`"false"` values are in effect.
    pub fn recognize(&self, value: &Value) -> Option<bool> {
        let raw = match value {
            Value::Bool(b) => return Some(*b),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        if raw == self.true_value {
            Some(true)
        } else if raw == self.false_value {
            Some(false)
        } else if matches!(value, Value::Number(_)) && self.has_default_values() {
            match raw.as_str() {
                "1" => Some(true),
                "0" => Some(false),
                _ => None,
            }
        } else {
            None
        }
    }
}

impl DataType for BooleanType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Boolean"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        match self.recognize(value) {
            Some(_) => ValidationResult::success(),
            None => ValidationResult::fail(format!("invalid boolean value: {value}")),
        }
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        Ok(match self.recognize(value) {
            Some(true) => Value::String(self.true_text.clone()),
            Some(false) => Value::String(self.false_text.clone()),
            None => value.clone(),
        })
    }

    fn as_converter(&self) -> Option<&dyn Converter> {
        Some(self)
    }

    fn describe(&self) -> Value {
        json!({
            "type": Self::ID,
            "trueValue": self.true_value,
            "falseValue": self.false_value,
            "trueText": self.true_text,
            "falseText": self.false_text,
        })
    }
}

impl Converter for BooleanType {
    fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
        self.recognize(value)
            .map(Value::Bool)
            .ok_or_else(|| MetadataError::conversion(Self::ID, value, "unrecognized boolean"))
    }
}
