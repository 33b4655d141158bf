//! The `date` data type.
//!
//! Accepts RFC 3339 strings, epoch-millisecond integers (or their string
//! form), and strings in the configured display format. All times are UTC.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use devmeta_core::MetadataError;
use serde_json::{json, Value};

use crate::data_type::{Converter, DataType};
use crate::result::ValidationResult;

/// Display format used when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeType {
    format: String,
}

impl Default for DateTimeType {
    fn default() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateTimeType {
    pub const ID: &'static str = "date";

    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom `strftime` display format.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::InvalidSchema` if the format string contains
    /// an unrecognized specifier.
    pub fn with_format(format: impl Into<String>) -> Result<Self, MetadataError> {
        let format = format.into();
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(MetadataError::InvalidSchema(format!(
                "invalid date format: {format:?}"
            )));
        }
        Ok(Self { format })
    }

    pub fn format_string(&self) -> &str {
        &self.format
    }

    /// Parse `value` into a UTC timestamp.
    pub fn parse(&self, value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Number(n) => n.as_i64().and_then(from_millis),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(millis) = s.parse::<i64>() {
                    return from_millis(millis);
                }
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                // Date-only formats parse to midnight.
                NaiveDateTime::parse_from_str(s, &self.format)
                    .ok()
                    .or_else(|| {
                        NaiveDate::parse_from_str(s, &self.format)
                            .ok()
                            .and_then(|date| date.and_hms_opt(0, 0, 0))
                    })
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }
            _ => None,
        }
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

impl DataType for DateTimeType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Date"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        match self.parse(value) {
            Some(_) => ValidationResult::success(),
            None => ValidationResult::fail(format!("invalid date value: {value}")),
        }
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        let Some(dt) = self.parse(value) else {
            return Ok(value.clone());
        };
        let mut out = String::new();
        if write!(out, "{}", dt.format(&self.format)).is_err() {
            return Ok(value.clone());
        }
        Ok(Value::String(out))
    }

    fn as_converter(&self) -> Option<&dyn Converter> {
        Some(self)
    }

    fn describe(&self) -> Value {
        json!({"type": Self::ID, "format": self.format})
    }
}

impl Converter for DateTimeType {
    /// Normalizes to epoch milliseconds.
    fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
        self.parse(value)
            .map(|dt| json!(dt.timestamp_millis()))
            .ok_or_else(|| MetadataError::conversion(Self::ID, value, "unrecognized date"))
    }
}
