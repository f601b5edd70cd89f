//! Settings management for the backend service.
//!
//! This crate provides the typed settings record and the loader that builds
//! it from env files and environment variables. Settings are loaded once at
//! process start and passed explicitly to every component that needs them.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, Reason, SettingsLoader, env_var_or_none, fields, render_env_template,
};
pub use types::{
    AppSettings, CelerySettings, ConnectionString, DatabaseSettings, Environment, JwtSettings,
    LogFormat, LogLevel, PoolConfig, RedisSettings, ServerSettings, Settings, TelemetrySettings,
    UnknownVariant,
};
