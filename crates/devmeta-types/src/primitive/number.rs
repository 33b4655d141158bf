//! Numeric data types: `int`, `long` and `double`.
//!
//! All three accept JSON numbers and numeric strings (telemetry frequently
//! carries `"21"` where `21` was meant). Conversion normalizes both into a JSON
//! number; formatting rounds to the configured scale and appends the unit.

use std::sync::Arc;

use devmeta_core::MetadataError;
use serde_json::{json, Map, Number, Value};

use crate::data_type::{Converter, DataType};
use crate::result::ValidationResult;
use crate::unit::ValueUnit;

/// Integer value of `value`, accepting integral floats and numeric strings.
///
/// Widened to `i128` so values beyond `i64` are reported as out of range
/// rather than as non-integers.
pub(crate) fn integer_of(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i128>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<i128> {
    let in_range = f >= i128::MIN as f64 && f < i128::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i128)
}

/// `integer_of`, restricted to `range`.
fn integer_in(value: &Value, range: (i64, i64)) -> Option<i64> {
    integer_of(value)
        .and_then(|n| i64::try_from(n).ok())
        .filter(|n| (range.0..=range.1).contains(n))
}

/// Finite floating-point value of `value`, accepting numeric strings.
pub(crate) fn float_of(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

fn apply_unit(number: Value, unit: Option<&Arc<dyn ValueUnit>>) -> Value {
    match unit {
        Some(unit) => Value::String(unit.format(&number)),
        None => number,
    }
}

fn validate_integer(
    type_id: &str,
    value: &Value,
    range: (i64, i64),
    min: Option<i64>,
    max: Option<i64>,
) -> ValidationResult {
    let Some(n) = integer_of(value) else {
        return ValidationResult::fail(format!("invalid {type_id} value: {value}"));
    };
    if n < i128::from(range.0) || n > i128::from(range.1) {
        return ValidationResult::fail(format!("{n} is out of range for {type_id}"));
    }
    if let Some(min) = min.filter(|min| n < i128::from(*min)) {
        return ValidationResult::fail(format!("{n} is less than minimum {min}"));
    }
    if let Some(max) = max.filter(|max| n > i128::from(*max)) {
        return ValidationResult::fail(format!("{n} is greater than maximum {max}"));
    }
    ValidationResult::success()
}

fn convert_integer(type_id: &str, value: &Value, range: (i64, i64)) -> Result<Value, MetadataError> {
    let n = integer_of(value)
        .ok_or_else(|| MetadataError::conversion(type_id, value, "not an integer"))?;
    i64::try_from(n)
        .ok()
        .filter(|n| (range.0..=range.1).contains(n))
        .map(|n| json!(n))
        .ok_or_else(|| MetadataError::conversion(type_id, value, "out of range"))
}

fn describe_numeric(
    type_id: &str,
    min: Option<Value>,
    max: Option<Value>,
    unit: Option<&Arc<dyn ValueUnit>>,
) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".into(), json!(type_id));
    if let Some(min) = min {
        out.insert("min".into(), min);
    }
    if let Some(max) = max {
        out.insert("max".into(), max);
    }
    if let Some(unit) = unit {
        out.insert("unit".into(), json!(unit.id()));
    }
    out
}

macro_rules! integer_type {
    ($(#[$meta:meta])* $ty:ident, $id:literal, $name:literal, $lower:expr, $upper:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $ty {
            min: Option<i64>,
            max: Option<i64>,
            unit: Option<Arc<dyn ValueUnit>>,
        }

        impl $ty {
            pub const ID: &'static str = $id;
            const RANGE: (i64, i64) = ($lower, $upper);

            pub fn new() -> Self {
                Self::default()
            }

            /// Reject values below `min` during validation.
            pub fn with_min(mut self, min: i64) -> Self {
                self.min = Some(min);
                self
            }

            /// Reject values above `max` during validation.
            pub fn with_max(mut self, max: i64) -> Self {
                self.max = Some(max);
                self
            }

            pub fn with_unit(mut self, unit: Arc<dyn ValueUnit>) -> Self {
                self.unit = Some(unit);
                self
            }

            pub fn unit(&self) -> Option<&Arc<dyn ValueUnit>> {
                self.unit.as_ref()
            }
        }

        impl DataType for $ty {
            fn id(&self) -> &str {
                Self::ID
            }

            fn name(&self) -> &str {
                $name
            }

            fn validate(&self, value: &Value) -> ValidationResult {
                validate_integer(Self::ID, value, Self::RANGE, self.min, self.max)
            }

            fn format(&self, value: &Value) -> Result<Value, MetadataError> {
                Ok(match integer_in(value, Self::RANGE) {
                    Some(n) => apply_unit(json!(n), self.unit.as_ref()),
                    None => value.clone(),
                })
            }

            fn as_converter(&self) -> Option<&dyn Converter> {
                Some(self)
            }

            fn describe(&self) -> Value {
                Value::Object(describe_numeric(
                    Self::ID,
                    self.min.map(|n| json!(n)),
                    self.max.map(|n| json!(n)),
                    self.unit.as_ref(),
                ))
            }
        }

        impl Converter for $ty {
            fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
                convert_integer(Self::ID, value, Self::RANGE)
            }
        }
    };
}

integer_type!(
    /// 32-bit signed integer.
    IntType,
    "int",
    "Integer",
    i32::MIN as i64,
    i32::MAX as i64
);

integer_type!(
    /// 64-bit signed integer.
    LongType,
    "long",
    "Long",
    i64::MIN,
    i64::MAX
);

/// Double-precision floating point number with an optional display scale.
#[derive(Debug, Clone, Default)]
pub struct DoubleType {
    min: Option<f64>,
    max: Option<f64>,
    scale: Option<u32>,
    unit: Option<Arc<dyn ValueUnit>>,
}

impl DoubleType {
    pub const ID: &'static str = "double";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Number of decimal places kept by `format`.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_unit(mut self, unit: Arc<dyn ValueUnit>) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    fn round(&self, f: f64) -> f64 {
        let Some(scale) = self.scale else {
            return f;
        };
        let factor = 10f64.powi(scale.min(i32::MAX as u32) as i32);
        let rounded = (f * factor).round() / factor;
        if rounded.is_finite() {
            rounded
        } else {
            f
        }
    }
}

impl DataType for DoubleType {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Double"
    }

    fn validate(&self, value: &Value) -> ValidationResult {
        let Some(f) = float_of(value) else {
            return ValidationResult::fail(format!("invalid double value: {value}"));
        };
        if let Some(min) = self.min.filter(|min| f < *min) {
            return ValidationResult::fail(format!("{f} is less than minimum {min}"));
        }
        if let Some(max) = self.max.filter(|max| f > *max) {
            return ValidationResult::fail(format!("{f} is greater than maximum {max}"));
        }
        ValidationResult::success()
    }

    fn format(&self, value: &Value) -> Result<Value, MetadataError> {
        let number = float_of(value).and_then(|f| Number::from_f64(self.round(f)));
        Ok(match number {
            Some(number) => apply_unit(Value::Number(number), self.unit.as_ref()),
            None => value.clone(),
        })
    }

    fn as_converter(&self) -> Option<&dyn Converter> {
        Some(self)
    }

    fn describe(&self) -> Value {
        let mut out = describe_numeric(
            Self::ID,
            self.min.map(|f| json!(f)),
            self.max.map(|f| json!(f)),
            self.unit.as_ref(),
        );
        if let Some(scale) = self.scale {
            out.insert("scale".into(), json!(scale));
        }
        Value::Object(out)
    }
}

impl Converter for DoubleType {
    fn convert(&self, value: &Value) -> Result<Value, MetadataError> {
        float_of(value)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| MetadataError::conversion(Self::ID, value, "not a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::builtin_unit;

    #[test]
    fn test_int_accepts_numbers_and_numeric_strings() {
        let int = IntType::new();
        assert!(int.validate(&json!(5)).is_success());
        assert!(int.validate(&json!("42")).is_success());
        assert!(int.validate(&json!(" -7 ")).is_success());
        assert!(int.validate(&json!(3.0)).is_success());
    }

    #[test]
    fn test_int_rejects_non_integers() {
        let int = IntType::new();
        let result = int.validate(&json!("notAnInt"));
        assert_eq!(result.reason(), Some(r#"invalid int value: "notAnInt""#));
        assert!(!int.validate(&json!(1.5)).is_success());
        assert!(!int.validate(&Value::Null).is_success());
        assert!(!int.validate(&json!(true)).is_success());
    }

    #[test]
    fn test_int_range_is_32_bit() {
        let int = IntType::new();
        assert!(int.validate(&json!(i32::MAX)).is_success());
        let result = int.validate(&json!(i32::MAX as i64 + 1));
        assert_eq!(result.reason(), Some("2147483648 is out of range for int"));
        assert!(LongType::new().validate(&json!(i32::MAX as i64 + 1)).is_success());
    }

    #[test]
    fn test_min_max_bounds() {
        let int = IntType::new().with_min(0).with_max(100);
        assert!(int.validate(&json!(50)).is_success());
        assert_eq!(
            int.validate(&json!(-1)).reason(),
            Some("-1 is less than minimum 0")
        );
        assert_eq!(
            int.validate(&json!(101)).reason(),
            Some("101 is greater than maximum 100")
        );
    }

    #[test]
    fn test_int_convert_normalizes_strings() {
        let int = IntType::new();
        assert_eq!(int.convert(&json!("42")).unwrap(), json!(42));
        assert_eq!(int.convert(&json!(7)).unwrap(), json!(7));
        assert!(matches!(
            int.convert(&json!("abc")),
            Err(MetadataError::Conversion { .. })
        ));
        assert!(int.convert(&json!(1i64 << 40)).is_err());
    }

    #[test]
    fn test_int_format_applies_unit() {
        let int = IntType::new().with_unit(builtin_unit("celsius").unwrap());
        assert_eq!(int.format(&json!(5)).unwrap(), json!("5℃"));
        assert_eq!(IntType::new().format(&json!("5")).unwrap(), json!(5));
    }

    #[test]
    fn test_int_format_leaves_invalid_values() {
        assert_eq!(IntType::new().format(&json!("abc")).unwrap(), json!("abc"));
        let wide = json!(1i64 << 40);
        assert_eq!(IntType::new().format(&wide).unwrap(), wide);
        assert_eq!(LongType::new().format(&wide).unwrap(), wide);
    }

    #[test]
    fn test_long_beyond_i64_is_out_of_range() {
        let long = LongType::new();
        assert_eq!(
            long.validate(&json!(u64::MAX)).reason(),
            Some("18446744073709551615 is out of range for long")
        );
        assert_eq!(
            long.validate(&json!("9223372036854775808")).reason(),
            Some("9223372036854775808 is out of range for long")
        );
        assert!(long.validate(&json!(i64::MAX)).is_success());
        assert!(matches!(
            long.convert(&json!(u64::MAX)),
            Err(MetadataError::Conversion { reason, .. }) if reason == "out of range"
        ));
    }

    #[test]
    fn test_double_validation() {
        let double = DoubleType::new().with_max(1.0);
        assert!(double.validate(&json!(0.5)).is_success());
        assert!(double.validate(&json!("0.25")).is_success());
        assert!(!double.validate(&json!(1.5)).is_success());
        assert!(!double.validate(&json!("NaN")).is_success());
        assert!(!double.validate(&json!([1.0])).is_success());
    }

    #[test]
    fn test_double_format_rounds_to_scale() {
        let double = DoubleType::new().with_scale(1);
        assert_eq!(double.format(&json!(21.46)).unwrap(), json!(21.5));
        let with_unit = DoubleType::new()
            .with_scale(2)
            .with_unit(builtin_unit("volt").unwrap());
        assert_eq!(with_unit.format(&json!("3.14159")).unwrap(), json!("3.14V"));
    }

    #[test]
    fn test_double_convert() {
        let double = DoubleType::new();
        assert_eq!(double.convert(&json!("2.5")).unwrap(), json!(2.5));
        assert!(double.convert(&json!("inf")).is_err());
    }

    #[test]
    fn test_describe_includes_configured_fields() {
        let described = IntType::new()
            .with_min(1)
            .with_unit(builtin_unit("percent").unwrap())
            .describe();
        assert_eq!(described, json!({"type": "int", "min": 1, "unit": "percent"}));
        assert_eq!(
            DoubleType::new().with_scale(2).describe(),
            json!({"type": "double", "scale": 2})
        );
    }
}
