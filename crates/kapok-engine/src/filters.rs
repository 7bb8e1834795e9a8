//! Template filters used by the chart catalog
//!
//! Names and behavior follow their Helm counterparts so the two template
//! stages read alike.

use minijinja::{Error, ErrorKind, Value};

/// Convert a value to YAML format
///
/// Usage: [[ services | toyaml ]]
pub fn toyaml(value: Value) -> Result<String, Error> {
    let json_value: serde_json::Value = serde_json::to_value(&value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    let yaml = serde_yaml::to_string(&json_value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

    // Remove trailing newline and leading "---\n" if present
    Ok(yaml.trim_start_matches("---\n").trim_end().to_string())
}

/// Quote a string with double quotes
///
/// Usage: [[ config.imageTag | quote ]]
#[must_use]
pub fn quote(value: Value) -> String {
    let s = match value.as_str() {
        Some(str_val) => str_val.to_string(),
        None => value.to_string(),
    };
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Indent text with a newline prefix (like Helm's nindent)
///
/// Usage: [[ content | nindent(4) ]]
#[must_use]
pub fn nindent(value: String, spaces: usize) -> String {
    let indent = " ".repeat(spaces);
    let mut result = String::with_capacity(1 + value.len() + spaces * value.lines().count());

    for line in value.lines() {
        result.push('\n');
        if !line.is_empty() {
            result.push_str(&indent);
            result.push_str(line);
        }
    }

    result
}
