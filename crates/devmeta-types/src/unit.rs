//! # Value Units
//!
//! Display suffixes applied by numeric formatting (`21.5` → `"21.5℃"`).
//! Units are display helpers only; they never take part in validation or
//! conversion.

use std::sync::Arc;

use serde_json::Value;

/// A unit that can render a value for display.
pub trait ValueUnit: std::fmt::Debug + Send + Sync {
    /// Stable identifier used by schema descriptors (e.g. `"celsius"`).
    fn id(&self) -> &str;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Symbol appended to formatted values.
    fn symbol(&self) -> &str;

    /// Render `value` with this unit.
    fn format(&self, value: &Value) -> String;
}

/// A unit rendered as the value immediately followed by its symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolUnit {
    id: String,
    name: String,
    symbol: String,
}

impl SymbolUnit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

impl ValueUnit for SymbolUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn format(&self, value: &Value) -> String {
        match value {
            // Avoid the surrounding quotes of the JSON rendering.
            Value::String(s) => format!("{s}{}", self.symbol),
            other => format!("{other}{}", self.symbol),
        }
    }
}

/// Ids of the units resolvable through [`builtin_unit`].
pub const BUILTIN_UNIT_IDS: &[&str] = &[
    "celsius", "percent", "volt", "ampere", "watt", "meter", "kilogram", "second",
];

/// Look up a built-in unit by id.
pub fn builtin_unit(id: &str) -> Option<Arc<dyn ValueUnit>> {
    let (name, symbol) = match id {
        "celsius" => ("Celsius", "℃"),
        "percent" => ("Percent", "%"),
        "volt" => ("Volt", "V"),
        "ampere" => ("Ampere", "A"),
        "watt" => ("Watt", "W"),
        "meter" => ("Meter", "m"),
        "kilogram" => ("Kilogram", "kg"),
        "second" => ("Second", "s"),
        _ => return None,
    };
    Some(Arc::new(SymbolUnit::new(id, name, symbol)))
}
