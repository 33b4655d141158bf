//! # Object Type
//!
//! The composite data type. Its values are keyed mappings; it owns an ordered
//! list of [`PropertyMetadata`] and applies each property's data type to the
//! entry with the same key.
//!
//! ## Validation
//!
//! - An object type with no declared properties imposes no structural
//!   constraint: every value validates, including `null` and non-mappings.
//! - Otherwise the value must be a mapping. Properties are checked in
//!   declaration order (absent keys are validated as `null`) and the first
//!   failing property's result is returned as-is. Later properties are not
//!   checked.
//! - A non-mapping value fails with [`UNSUPPORTED_FORMAT`].
//!
//! ## Format and Convert
//!
//! Both walk the value with one engine, parameterized by the per-property
//! transform:
//!
//! - `null` is returned as `null` without traversal.
//! - A mapping is copied; each declared property whose key holds a non-null
//!   value is replaced by the transformed value. Undeclared keys are kept.
//!   The input is never mutated.
//! - Any other value is a shape mismatch and fails with
//!   `MetadataError::InvalidShape`, for `format` and `convert` alike.
//!
//! When several properties share an id, the first declared one owns the key,
//! both in [`ObjectType::property_map`] and in the transform engine.

use std::collections::{HashMap, HashSet};

use devmeta_core::{MetadataError, ValueKind};
use serde_json::{json, Map, Value};

use crate::data_type::{convert_or_pass, Converter, DataType};
use crate::property::PropertyMetadata;
use crate::result::{ValidationResult, UNSUPPORTED_FORMAT};

#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    properties: Vec<PropertyMetadata>,
    expands: Map<String, Value>,
    description: Option<String>,
}

impl ObjectType {
    pub const ID: &'static str = "object";

    /// An object type with no declared properties.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = PropertyMetadata>) -> Self {
        self.properties.extend(properties);
        self
    }

    /// Attach free-form extension data. Never consulted by validation.
    pub fn with_expand(mut self, key: impl Into<String>, value: Value) -> Self {
        self.expands.insert(key.into(), value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declared properties in declaration order.
    pub fn properties(&self) -> &[PropertyMetadata] {
        &self.properties
    }

    pub fn expands(&self) -> &Map<String, Value> {
        &self.expands
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Properties keyed by id. On duplicate ids the first declared wins.
    pub fn property_map(&self) -> HashMap<&str, &PropertyMetadata> {
        let mut map = HashMap::with_capacity(self.properties.len());
        for property in &self.properties {
            map.entry(property.id()).or_insert(property);
        }
        map
    }

    /// The first declared property with the given id.
    pub fn property(&self, id: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|property| property.id() == id)
    }

    /// Rebuild `value` with every declared, non-null property replaced by
    /// `mapping(property_type, raw_value)`.
    pub fn handle<F>(&self, value: &Value, mapping: F) -> Result<Value, MetadataError>
    where
        F: Fn(&dyn DataType, &Value) -> Result<Value, MetadataError>,
    {
        let map = match value {
            Value::Null => return Ok(Value::Null),
            Value::Object(map) => map,
            other => {
                tracing::warn!(
                    type_id = Self::ID,
                    found = %ValueKind::of(other),
                    "unsupported object value"
                );
                return Err(MetadataError::invalid_shape(Self::ID, ValueKind::Object, other));
            }
        };

        let mut out = map.clone();
        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            if !seen.insert(property.id()) {
                continue;
            }
            match map.get(property.id()) {
                None | Some(Value::Null) => {}
                Some(data) => {
                    let transformed = mapping(property.value_type(), data)?;
                    out.insert(property.id().to_string(), transformed);
                }
            }
        }
        Ok(Value::Object(out))
    }
}

impl DataType for ObjectType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Object"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        if !self.has_properties() {
            return ValidationResult::success();
        }
        let Value::Object(map) = value else {
            return ValidationResult::fail(UNSUPPORTED_FORMAT);
        };
        for property in &self.properties {
            let data = map.get(property.id()).unwrap_or(&Value::Null);
            let result = property.value_type().validate(data);
            if !result.is_success() {
                tracing::debug!(
                    property = property.id(),
                    reason = result.reason().unwrap_or_default(),
                    "object property failed validation"
                );
                return result;
            }
        }
        ValidationResult::success()
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        self.handle(value, |data_type, data| data_type.format(data))
    }

    fn as_converter(&self) -> Option<&dyn Converter> {
        Some(self)
    }

    fn describe(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!(Self::ID));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        out.insert(
            "properties".into(),
            Value::Array(self.properties.iter().map(PropertyMetadata::describe).collect()),
        );
        if !self.expands.is_empty() {
            out.insert("expands".into(), Value::Object(self.expands.clone()));
        }
        Value::Object(out)
    }
}

impl Converter for ObjectType {
    fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
        self.handle(value, convert_or_pass)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::primitive::{IntType, StringType};
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z0-9]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]{1,3}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn typed() -> ObjectType {
        ObjectType::new()
            .with_property(PropertyMetadata::of("a", IntType::new()).unwrap())
            .with_property(PropertyMetadata::of("b", StringType).unwrap())
    }

    proptest! {
        /// An object type without properties accepts every value.
        #[test]
        fn schemaless_validate_always_succeeds(value in json_value()) {
            prop_assert!(ObjectType::new().validate(&value).is_success());
        }

        /// Formatting keeps every key of the input, declared or not.
        #[test]
        fn format_preserves_keys(map in prop::collection::btree_map("[a-d]{1,3}", json_value(), 0..6)) {
            let value = Value::Object(map.into_iter().collect());
            let formatted = typed().format(&value).unwrap();
            let before: Vec<&String> = value.as_object().unwrap().keys().collect();
            let after: Vec<&String> = formatted.as_object().unwrap().keys().collect();
            prop_assert_eq!(before, after);
        }

        /// Undeclared keys pass through conversion untouched.
        #[test]
        fn convert_leaves_undeclared_keys(extra in json_value()) {
            let value = json!({"a": 1, "zz": extra.clone()});
            let converted = typed().convert(&value).unwrap();
            prop_assert_eq!(&converted["zz"], &extra);
        }
    }
}
