//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate global options into a configured `SettingsLoader`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate settings (see `backend_config::SettingsLoader::load`).

use backend_config::{LogLevel, SettingsLoader};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "backend")]
#[command(about = "Backend settings preflight - load, validate and inspect service configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  backend check\n  backend --env-file .env.production check --strict\n  backend show --output json\n  backend template > .env.example\n"
)]
pub struct Cli {
    /// Env file to read (repeatable; later files override earlier ones).
    ///
    /// Defaults to .env, .env.local and .env.development in the working directory.
    #[arg(long = "env-file", global = true, value_name = "FILE")]
    pub env_files: Vec<PathBuf>,

    /// Read no env files; use only the process environment
    #[arg(long, global = true, conflicts_with = "env_files")]
    pub no_env_files: bool,

    /// Log level for this run (overrides LOG_LEVEL)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and validate settings, then report security warnings
    Check {
        /// Treat security warnings as configuration errors
        #[arg(long)]
        strict: bool,
    },

    /// Print the loaded settings with secrets redacted
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Print an annotated env template listing every setting
    Template,
}

impl Commands {
    /// Whether the command needs a validated `Settings` value.
    pub fn needs_settings(&self) -> bool {
        !matches!(self, Commands::Template)
    }
}

impl Cli {
    /// Build the settings loader described by the global options.
    pub fn settings_loader(&self) -> SettingsLoader {
        let mut loader = SettingsLoader::new();

        if !self.no_env_files {
            loader = if self.env_files.is_empty() {
                loader.with_default_env_files()
            } else {
                loader.with_env_files(self.env_files.iter().cloned())
            };
        }

        if let Some(level) = self.log_level {
            loader = loader.with_var("LOG_LEVEL", level.as_str());
        }

        loader
    }
}
