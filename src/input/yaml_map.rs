use crate::error::{InputError, Result};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Parse a `namespace: path/to/file.conf` map.
///
/// Only a flat mapping of strings is accepted and every value must name a
/// `.conf` file. Entry order is preserved.
pub fn parse_yaml_map(path: &Path, text: &str) -> Result<Vec<(String, PathBuf)>> {
    let schema = |reason: String| InputError::Schema {
        path: path.to_path_buf(),
        reason,
    };

    let document: Value = serde_yaml::from_str(text)
        .map_err(|e| schema(format!("not valid YAML: {}", e)))?;

    let mapping = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(schema(format!(
                "expected a map of namespace to config file, found {}",
                describe(&other)
            ))
            .into())
        }
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = match key {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(schema(format!("namespace keys must be strings, found {}", describe(&other))).into())
            }
        };
        let config = match value {
            Value::String(s) => s.trim().to_string(),
            other => {
                return Err(schema(format!(
                    "'{}' must map to a config file path, found {}",
                    name,
                    describe(&other)
                ))
                .into())
            }
        };
        if !config.ends_with(".conf") {
            return Err(schema(format!(
                "'{}' maps to '{}', which is not a .conf file",
                name, config
            ))
            .into());
        }
        entries.push((name, PathBuf::from(config)));
    }

    Ok(entries)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a nested map",
        Value::Tagged(_) => "a tagged value",
    }
}
