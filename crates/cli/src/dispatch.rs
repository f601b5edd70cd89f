//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Settings loading (see `main()`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::settings_context::SettingsContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: &Cli, settings: SettingsContext) -> Result<()> {
    match cli.command {
        Commands::Check { strict } => {
            let settings = settings.into_settings()?;
            commands::check::run(&settings, strict)?;
        }
        Commands::Show { output } => {
            let settings = settings.into_settings()?;
            commands::show::run(&settings, output)?;
        }
        Commands::Template => {
            commands::template::run();
        }
    }
    Ok(())
}
