//! # Schema Loader
//!
//! Builds data type trees from declarative descriptors. A descriptor is a
//! JSON (or YAML) object tagged by `"type"`:
//!
//! ```json
//! {
//!   "type": "object",
//!   "description": "Thermostat report",
//!   "properties": [
//!     { "id": "temp", "name": "Temperature",
//!       "valueType": { "type": "double", "scale": 1, "unit": "celsius" } },
//!     { "id": "mode",
//!       "valueType": { "type": "enum",
//!                      "elements": [ { "value": "0", "text": "Off" } ] } }
//!   ]
//! }
//! ```
//!
//! Every [`DataType::describe`](crate::DataType::describe) output is a valid
//! descriptor, so a loaded tree can be written back out unchanged.
//!
//! YAML documents are converted to a JSON value tree before deserialization,
//! so both formats go through exactly the same descriptor parsing.

use std::sync::Arc;

use devmeta_core::{Codec, MetadataError, YamlCodec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data_type::DataTypeRef;
use crate::object::ObjectType;
use crate::primitive::{
    ArrayType, BooleanType, DateTimeType, DoubleType, EnumElement, EnumType, IntType, LongType,
    StringType,
};
use crate::property::PropertyMetadata;
use crate::unit::{builtin_unit, ValueUnit};

/// Declarative description of a data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDescriptor {
    String,
    Int(IntegerDescriptor),
    Long(IntegerDescriptor),
    Double(DoubleDescriptor),
    Boolean(BooleanDescriptor),
    Date(DateDescriptor),
    Enum(EnumDescriptor),
    Array(ArrayDescriptor),
    Object(ObjectDescriptor),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Id of a built-in unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateDescriptor {
    /// `strftime` display format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    #[serde(default)]
    pub elements: Vec<EnumElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<TypeDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absent and empty both mean "no declared properties".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expands: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_type: TypeDescriptor,
}

fn resolve_unit(unit: Option<&str>) -> Result<Option<Arc<dyn ValueUnit>>, MetadataError> {
    unit.map(|id| {
        builtin_unit(id).ok_or_else(|| MetadataError::InvalidSchema(format!("unknown unit: {id:?}")))
    })
    .transpose()
}

impl TypeDescriptor {
    /// Build the data type tree described by this descriptor.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::InvalidSchema` for unknown unit ids, invalid
    /// date formats, and empty property ids.
    pub fn build(&self) -> Result<DataTypeRef, MetadataError> {
        let data_type: DataTypeRef = match self {
            Self::String => Arc::new(StringType),
            Self::Int(d) => {
                let mut ty = IntType::new();
                if let Some(min) = d.min {
                    ty = ty.with_min(min);
                }
                if let Some(max) = d.max {
                    ty = ty.with_max(max);
                }
                if let Some(unit) = resolve_unit(d.unit.as_deref())? {
                    ty = ty.with_unit(unit);
                }
                Arc::new(ty)
            }
            Self::Long(d) => {
                let mut ty = LongType::new();
                if let Some(min) = d.min {
                    ty = ty.with_min(min);
                }
                if let Some(max) = d.max {
                    ty = ty.with_max(max);
                }
                if let Some(unit) = resolve_unit(d.unit.as_deref())? {
                    ty = ty.with_unit(unit);
                }
                Arc::new(ty)
            }
            Self::Double(d) => {
                let mut ty = DoubleType::new();
                if let Some(min) = d.min {
                    ty = ty.with_min(min);
                }
                if let Some(max) = d.max {
                    ty = ty.with_max(max);
                }
                if let Some(scale) = d.scale {
                    ty = ty.with_scale(scale);
                }
                if let Some(unit) = resolve_unit(d.unit.as_deref())? {
                    ty = ty.with_unit(unit);
                }
                Arc::new(ty)
            }
            Self::Boolean(d) => {
                let or_default =
                    |field: &Option<String>, fallback: &str| field.clone().unwrap_or_else(|| fallback.to_string());
                Arc::new(
                    BooleanType::new()
                        .with_values(or_default(&d.true_value, "true"), or_default(&d.false_value, "false"))
                        .with_text(or_default(&d.true_text, "true"), or_default(&d.false_text, "false")),
                )
            }
            Self::Date(d) => match &d.format {
                Some(format) => Arc::new(DateTimeType::with_format(format.as_str())?),
                None => Arc::new(DateTimeType::new()),
            },
            Self::Enum(d) => Arc::new(EnumType::new(d.elements.iter().cloned())),
            Self::Array(d) => match &d.element_type {
                Some(element) => Arc::new(ArrayType::of(element.build()?)),
                None => Arc::new(ArrayType::new()),
            },
            Self::Object(d) => Arc::new(d.build()?),
        };
        Ok(data_type)
    }
}

impl ObjectDescriptor {
    /// Build the object type described by this descriptor.
    pub fn build(&self) -> Result<ObjectType, MetadataError> {
        let mut object = ObjectType::new();
        for property in self.properties.iter().flatten() {
            object = object.with_property(property.build()?);
        }
        for (key, value) in self.expands.iter().flatten() {
            object = object.with_expand(key.clone(), value.clone());
        }
        if let Some(description) = &self.description {
            object = object.with_description(description.clone());
        }
        Ok(object)
    }
}

impl PropertyDescriptor {
    pub fn build(&self) -> Result<PropertyMetadata, MetadataError> {
        let value_type = self.value_type.build()?;
        let mut property = PropertyMetadata::new(self.id.clone(), value_type)
            .map_err(|e| match (e, &self.name) {
                (MetadataError::InvalidSchema(reason), Some(name)) => {
                    MetadataError::InvalidSchema(format!("{reason} (name: {name})"))
                }
                (other, _) => other,
            })?;
        if let Some(name) = &self.name {
            property = property.with_name(name.clone());
        }
        if let Some(description) = &self.description {
            property = property.with_description(description.clone());
        }
        Ok(property)
    }
}

/// Build a data type tree from a parsed descriptor value.
pub fn from_value(value: &Value) -> Result<DataTypeRef, MetadataError> {
    let descriptor = TypeDescriptor::deserialize(value)
        .map_err(|e| MetadataError::InvalidSchema(e.to_string()))?;
    let data_type = descriptor.build()?;
    tracing::debug!(type_id = data_type.id(), "loaded data type descriptor");
    Ok(data_type)
}

/// Build a data type tree from a JSON descriptor document.
pub fn load_json(content: &str) -> Result<DataTypeRef, MetadataError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| MetadataError::InvalidSchema(format!("invalid JSON: {e}")))?;
    from_value(&value)
}

/// Build a data type tree from a YAML descriptor document.
pub fn load_yaml(content: &str) -> Result<DataTypeRef, MetadataError> {
    let value = YamlCodec
        .decode(content.as_bytes())
        .map_err(|e| MetadataError::InvalidSchema(format!("invalid YAML: {e}")))?;
    from_value(&value)
}
