//! The `enum` data type: a closed set of raw values with display text.

use devmeta_core::MetadataError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::data_type::DataType;
use crate::result::ValidationResult;

/// One allowed value of an [`EnumType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumElement {
    /// Raw value as reported by the device (compared by string form).
    pub value: String,
    /// Display text.
    pub text: String,
}

impl EnumElement {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumType {
    elements: Vec<EnumElement>,
}

impl EnumType {
    pub const ID: &'static str = "enum";

    pub fn new(elements: impl IntoIterator<Item = EnumElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn elements(&self) -> &[EnumElement] {
        &self.elements
    }

    /// The element whose raw value matches `value`.
    pub fn element_of(&self, value: &Value) -> Option<&EnumElement> {
        let key = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        self.elements.iter().find(|element| element.value == key)
    }
}

impl DataType for EnumType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Enum"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        match self.element_of(value) {
            Some(_) => ValidationResult::success(),
            None => ValidationResult::fail(format!("invalid enum value: {value}")),
        }
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        Ok(match self.element_of(value) {
            Some(element) => Value::String(element.text.clone()),
            None => value.clone(),
        })
    }

    fn describe(&self) -> Value {
        json!({"type": Self::ID, "elements": self.elements})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> EnumType {
        EnumType::new([
            EnumElement::new("0", "Off"),
            EnumElement::new("1", "Cooling"),
            EnumElement::new("heat", "Heating"),
        ])
    }

    #[test]
    fn test_matches_by_string_form() {
        let mode = mode();
        assert!(mode.validate(&json!(1)).is_success());
        assert!(mode.validate(&json!("heat")).is_success());
        assert_eq!(
            mode.validate(&json!("fan")).reason(),
            Some(r#"invalid enum value: "fan""#)
        );
    }

    #[test]
    fn test_format_returns_text() {
        assert_eq!(mode().format(&json!(0)).unwrap(), json!("Off"));
        assert_eq!(mode().format(&json!("fan")).unwrap(), json!("fan"));
    }

    #[test]
    fn test_empty_enum_rejects_everything() {
        assert!(!EnumType::default().validate(&json!("x")).is_success());
    }
}
