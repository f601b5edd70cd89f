//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format the settings view as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Redaction (secrets serialize as `********` already).

use anyhow::Result;

use crate::formatters::{Formatter, SettingsView};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_settings(&self, view: &SettingsView<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}
