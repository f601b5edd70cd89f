//! Settings loader for env files and environment variables.
//!
//! Responsibilities:
//! - Load settings from `KEY=VALUE` env files and the process environment.
//! - Provide a builder-pattern `SettingsLoader` for layered sources.
//! - Coerce and validate every declared field, failing with `ConfigError`.
//! - Render an env template from the declared field table.
//!
//! Does NOT handle:
//! - Logging or telemetry setup (see the CLI crate).
//! - Holding settings as global state; callers own the returned value.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over env file values.
//! - Loading is all-or-nothing: no partially populated `Settings` is ever returned.
//! - The `DOTENV_DISABLED` variable is checked before any env file is read.

mod builder;
mod env;
mod error;
pub mod fields;
mod template;
mod values;

pub use builder::SettingsLoader;
pub use env::env_var_or_none;
pub use error::{ConfigError, Reason};
pub use template::render_env_template;

#[cfg(test)]
mod tests;
