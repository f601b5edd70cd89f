//! Output formatters for the `show` command.
//!
//! Provides table and JSON renderings of the loaded settings. Both render the
//! same serialized view, so secret redaction is decided once, by `Settings`'
//! `Serialize` implementation.

use anyhow::Result;
use backend_config::{PoolConfig, Settings};
use clap::ValueEnum;
use serde::Serialize;

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Everything `show` prints: the settings plus values derived from them.
#[derive(Debug, Serialize)]
pub struct SettingsView<'a> {
    #[serde(flatten)]
    pub settings: &'a Settings,
    pub service_name: &'a str,
    pub effective_pool: PoolConfig,
    pub warnings: Vec<String>,
}

impl<'a> SettingsView<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            service_name: settings.service_name(),
            effective_pool: settings.pool_config(),
            warnings: settings.security_warnings(),
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_settings(&self, view: &SettingsView<'_>) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
