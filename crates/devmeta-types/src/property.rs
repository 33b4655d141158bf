//! # Property Metadata
//!
//! A named slot within an object type, binding a property id to the data
//! type of its value. Property ids are the primary lookup key and must be
//! non-empty.

use std::sync::Arc;

use devmeta_core::MetadataError;
use serde_json::{json, Map, Value};

use crate::data_type::{DataType, DataTypeRef};

#[derive(Debug, Clone)]
pub struct PropertyMetadata {
    id: String,
    name: String,
    description: Option<String>,
    value_type: DataTypeRef,
}

impl PropertyMetadata {
    /// Create a property whose display name is its id.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::InvalidSchema` if `id` is empty.
    pub fn new(id: impl Into<String>, value_type: DataTypeRef) -> Result<Self, MetadataError> {
        let id = id.into();
        if id.is_empty() {
            return Err(MetadataError::InvalidSchema(
                "property id must not be empty".into(),
            ));
        }
        Ok(Self {
            name: id.clone(),
            id,
            description: None,
            value_type,
        })
    }

    /// Shorthand for [`PropertyMetadata::new`] with an owned data type.
    pub fn of(id: impl Into<String>, value_type: impl DataType + 'static) -> Result<Self, MetadataError> {
        Self::new(id, Arc::new(value_type))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value_type(&self) -> &dyn DataType {
        self.value_type.as_ref()
    }

    /// Descriptor of this property in the form accepted by the schema loader.
    pub fn describe(&self) -> Value {
        let mut out = Map::new();
        out.insert("id".into(), json!(self.id));
        out.insert("name".into(), json!(self.name));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        out.insert("valueType".into(), self.value_type.describe());
        Value::Object(out)
    }
}
