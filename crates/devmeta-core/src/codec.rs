//! # Wire Codec
//!
//! Moves telemetry values in and out of the metadata system. The type system
//! only ever sees decoded `serde_json::Value` trees; this module is the single
//! place where bytes are involved. The JSON codecs are thin pass-throughs to
//! `serde_json`. [`YamlCodec`] maps YAML documents onto the same value model.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::error::CodecError;
use crate::kind::ValueKind;

/// Encodes a body to payload bytes and decodes it back.
pub trait Codec: Send + Sync {
    /// The decoded body type.
    type Target;

    /// Serialize `body` to payload bytes.
    fn encode(&self, body: &Self::Target) -> Result<Vec<u8>, CodecError>;

    /// Parse payload bytes into a body.
    fn decode(&self, payload: &[u8]) -> Result<Self::Target, CodecError>;
}

/// Codec for arbitrary JSON values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Target = Value;

    fn encode(&self, body: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(body)?)
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(payload)?)
    }
}

/// Codec for JSON array payloads.
///
/// Decoding a payload that is valid JSON but not an array fails with
/// [`CodecError::UnexpectedShape`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayCodec;

impl Codec for JsonArrayCodec {
    type Target = Vec<Value>;

    fn encode(&self, body: &Vec<Value>) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(body)?)
    }

    fn decode(&self, payload: &[u8]) -> Result<Vec<Value>, CodecError> {
        match serde_json::from_slice::<Value>(payload)? {
            Value::Array(items) => Ok(items),
            other => Err(CodecError::UnexpectedShape {
                expected: ValueKind::Array,
                found: ValueKind::of(&other),
            }),
        }
    }
}

/// Codec for YAML documents, decoded into the JSON value model.
///
/// Tags are dropped. Scalar mapping keys are rendered as strings; null and
/// container keys are rejected, as are numbers JSON cannot represent.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    type Target = Value;

    fn encode(&self, body: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_yaml::to_string(body)?.into_bytes())
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        from_yaml(serde_yaml::from_slice(payload)?)
    }
}

fn from_yaml(yaml: Yaml) -> Result<Value, CodecError> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => from_yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(yaml_key(key)?, from_yaml(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

fn from_yaml_number(n: &serde_yaml::Number) -> Result<Value, CodecError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| CodecError::UnsupportedYaml(format!("non-finite number {n}")))
}

fn yaml_key(key: Yaml) -> Result<String, CodecError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Null => Err(CodecError::UnsupportedYaml("null mapping key".into())),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(CodecError::UnsupportedYaml(
            "container used as mapping key".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_codec_decodes_telemetry_report() {
        let payload = br#"{"deviceId":"sensor-01","temp":21.5,"online":true}"#;
        let value = JsonCodec.decode(payload).unwrap();
        assert_eq!(value["deviceId"], "sensor-01");
        assert_eq!(value["temp"], 21.5);
        assert_eq!(value["online"], true);
    }

    #[test]
    fn test_json_codec_encodes_compactly() {
        let bytes = JsonCodec.encode(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(bytes, br#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_json_codec_rejects_malformed_payload() {
        let err = JsonCodec.decode(b"{\"a\":").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_array_codec_decodes_array() {
        let items = JsonArrayCodec.decode(br#"[1, "two", null]"#).unwrap();
        assert_eq!(items, vec![json!(1), json!("two"), Value::Null]);
    }

    #[test]
    fn test_array_codec_rejects_object_payload() {
        let err = JsonArrayCodec.decode(br#"{"a": 1}"#).unwrap_err();
        match err {
            CodecError::UnexpectedShape { expected, found } => {
                assert_eq!(expected, ValueKind::Array);
                assert_eq!(found, ValueKind::Object);
            }
            other => panic!("Expected UnexpectedShape, got: {other}"),
        }
    }

    #[test]
    fn test_array_codec_encodes_empty_array() {
        assert_eq!(JsonArrayCodec.encode(&Vec::new()).unwrap(), b"[]");
    }

    #[test]
    fn test_yaml_codec_decodes_into_json_model() {
        let value = YamlCodec
            .decode(b"count: 42\nratio: 0.5\n1: one\ntrue: yes\nitems: [a, !tag b]\n")
            .unwrap();
        assert_eq!(
            value,
            json!({"count": 42, "ratio": 0.5, "1": "one", "true": "yes", "items": ["a", "b"]})
        );
    }

    #[test]
    fn test_yaml_codec_rejects_unrepresentable_input() {
        assert!(matches!(
            YamlCodec.decode(b"ratio: .nan\n"),
            Err(CodecError::UnsupportedYaml(_))
        ));
        assert!(matches!(
            YamlCodec.decode(b"? [a, b]\n: pair\n"),
            Err(CodecError::UnsupportedYaml(_))
        ));
        assert!(matches!(
            YamlCodec.decode(b"a: [unclosed\n"),
            Err(CodecError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_codec_encodes_readable_yaml() {
        let bytes = YamlCodec.encode(&json!({"temp": 21})).unwrap();
        assert_eq!(YamlCodec.decode(&bytes).unwrap(), json!({"temp": 21}));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
        ]
    }

    proptest! {
        /// Scalar payloads are never accepted as arrays.
        #[test]
        fn array_codec_rejects_scalars(value in scalar()) {
            let bytes = JsonCodec.encode(&value).unwrap();
            let result = JsonArrayCodec.decode(&bytes);
            let is_unexpected_shape = matches!(result, Err(CodecError::UnexpectedShape { .. }));
            prop_assert!(is_unexpected_shape);
        }

        /// Whatever the array codec encodes, the generic codec reads as an array.
        #[test]
        fn array_codec_output_is_json_array(items in prop::collection::vec(scalar(), 0..8)) {
            let bytes = JsonArrayCodec.encode(&items).unwrap();
            let decoded = JsonCodec.decode(&bytes).unwrap();
            prop_assert_eq!(decoded, Value::Array(items));
        }
    }
}
