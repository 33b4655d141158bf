//! Reading descriptors and telemetry documents from disk.
//!
//! The format is chosen by file extension: `.yaml`/`.yml` are parsed as YAML
//! into the JSON value model, everything else is parsed as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use devmeta_core::{Codec, JsonCodec, YamlCodec};
use devmeta_types::schema::from_value;
use devmeta_types::DataTypeRef;
use serde_json::Value;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML document into a value tree.
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;

    if is_yaml(path) {
        YamlCodec
            .decode(&bytes)
            .with_context(|| format!("invalid YAML in {}", path.display()))
    } else {
        JsonCodec
            .decode(&bytes)
            .with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

/// Load a data type descriptor file.
pub fn load_schema(path: &Path) -> Result<DataTypeRef> {
    let descriptor = read_document(path)?;
    let data_type = from_value(&descriptor)
        .with_context(|| format!("failed to load schema {}", path.display()))?;
    tracing::info!(
        schema = %path.display(),
        type_id = data_type.id(),
        "loaded schema"
    );
    Ok(data_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_yaml_by_extension() {
        let file = write_temp(".yml", "temp: 21\nok: true\n");
        let value = read_document(file.path()).unwrap();
        assert_eq!(value, serde_json::json!({"temp": 21, "ok": true}));
    }

    #[test]
    fn test_read_yaml_error_names_format() {
        let file = write_temp(".yaml", "ratio: .inf\n");
        let err = read_document(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid YAML"));
        assert!(message.contains("non-finite number"));
    }

    #[test]
    fn test_read_json_error_names_file() {
        let file = write_temp(".json", "{not json");
        let err = read_document(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid JSON"));
    }

    #[test]
    fn test_load_schema_reports_descriptor_errors() {
        let file = write_temp(".json", r#"{"type": "int", "unit": "parsec"}"#);
        let err = load_schema(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown unit"));
    }
}
