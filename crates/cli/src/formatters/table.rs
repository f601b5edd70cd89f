//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format the settings view as an aligned two-column table of dotted keys.
//!
//! Does NOT handle:
//! - Redaction (applied by serialization before rows are built).

use anyhow::Result;
use serde_json::Value;

use crate::formatters::{Formatter, SettingsView};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_settings(&self, view: &SettingsView<'_>) -> Result<String> {
        let value = serde_json::to_value(view)?;
        let mut rows = Vec::new();
        flatten("", &value, &mut rows);

        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        let mut output = String::new();
        output.push_str(&format!("{:<width$}  VALUE\n", "SETTING"));
        output.push_str(&format!("{:<width$}  -----\n", "-------"));
        for (key, value) in rows {
            output.push_str(&format!("{key:<width$}  {value}\n"));
        }
        Ok(output)
    }
}

/// Collect `(dotted.key, display value)` rows, sorted by key within each object.
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar)
                .collect::<Vec<_>>()
                .join(", ");
            rows.push((prefix.to_string(), joined));
        }
        other => rows.push((prefix.to_string(), scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
