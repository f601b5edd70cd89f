//! Backend CLI - load, validate and inspect service settings.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Load settings once at startup and fail fast on configuration errors.
//! - Initialize logging and tracing from the loaded settings.
//! - Dispatch preflight commands and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Settings semantics (see `crates/config`).
//!
//! Invariants:
//! - Settings are loaded BEFORE logging is initialized, so a configuration
//!   error is reported on stderr as plain text with exit code 78.
//! - Settings are constructed once and shared through `Arc`; nothing reloads them.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod settings_context;
mod telemetry;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use settings_context::SettingsContext;
use std::sync::Arc;
use telemetry::TracingConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (context, tracing_guard) = if cli.command.needs_settings() {
        let settings = match cli.settings_loader().load() {
            Ok(settings) => Arc::new(settings),
            Err(e) => {
                eprintln!("configuration error: {e}");
                std::process::exit(ExitCode::from(&e).as_i32());
            }
        };

        let guard = match TracingConfig::from_settings(&settings).init() {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to initialize logging: {e}");
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        };

        tracing::debug!(
            environment = %settings.environment,
            exporting = guard.is_exporting(),
            "settings loaded"
        );

        (SettingsContext::Loaded(settings), Some(guard))
    } else {
        (SettingsContext::Unloaded, None)
    };

    let exit_code = match run_command(&cli, context) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{e:#}");
            e.exit_code()
        }
    };

    // Shutdown tracing to ensure all spans are flushed
    if let Some(guard) = tracing_guard {
        guard.shutdown();
    }

    std::process::exit(exit_code.as_i32());
}
