//! Show command: print the loaded settings with secrets redacted.

use anyhow::Result;
use backend_config::Settings;

use crate::formatters::{OutputFormat, SettingsView, get_formatter};

pub fn run(settings: &Settings, format: OutputFormat) -> Result<()> {
    let output = get_formatter(format).format_settings(&SettingsView::new(settings))?;
    println!("{}", output.trim_end());
    Ok(())
}
