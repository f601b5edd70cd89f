//! Settings context for command execution.
//!
//! Responsibilities:
//! - Distinguish between commands that run with loaded settings and those that
//!   run without them.
//! - Provide type-safe extraction of settings for commands that need them.
//!
//! Does NOT handle:
//! - Settings loading (done in `main()`).
//!
//! Invariants:
//! - `Loaded` settings were fully validated before any command runs.
//! - Settings are shared read-only through `Arc`; no command mutates them.

use backend_config::Settings;
use std::sync::Arc;

pub(crate) enum SettingsContext {
    /// Settings loaded and validated at startup.
    Loaded(Arc<Settings>),
    /// No settings were loaded because the command does not read them.
    Unloaded,
}

impl SettingsContext {
    /// Extract the loaded settings, failing if none were loaded.
    pub(crate) fn into_settings(self) -> anyhow::Result<Arc<Settings>> {
        match self {
            SettingsContext::Loaded(settings) => Ok(settings),
            SettingsContext::Unloaded => {
                anyhow::bail!("Internal error: command requires settings but none were loaded")
            }
        }
    }
}
