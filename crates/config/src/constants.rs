//! Centralized constants for the backend settings workspace.
//!
//! Field defaults live next to their field declarations (see `loader::fields`);
//! this module holds the values shared between the loader, the derived views
//! and the CLI.

// =============================================================================
// Env File Discovery
// =============================================================================

/// Env files read by `SettingsLoader::with_default_env_files`, lowest priority first.
pub const DEFAULT_ENV_FILES: &[&str] = &[".env", ".env.local", ".env.development"];

/// Environment variable that disables env file loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Redaction
// =============================================================================

/// Replacement text for secrets and connection-string passwords.
pub const REDACTED: &str = "********";

/// Secrets shorter than this are reported by `Settings::security_warnings`.
pub const MIN_SECRET_LEN: usize = 32;

// =============================================================================
// Database Pool Presets
// =============================================================================

/// Production pool: connections kept open.
pub const PRODUCTION_POOL_SIZE: u32 = 20;
/// Production pool: connections allowed above `PRODUCTION_POOL_SIZE`.
pub const PRODUCTION_MAX_OVERFLOW: u32 = 30;
/// Production pool: connection recycle age in seconds.
pub const PRODUCTION_POOL_RECYCLE_SECS: u64 = 3600;
/// Production pool: checkout timeout in seconds.
pub const PRODUCTION_POOL_TIMEOUT_SECS: u64 = 30;

/// Staging pool: connections kept open.
pub const STAGING_POOL_SIZE: u32 = 10;
/// Staging pool: connections allowed above `STAGING_POOL_SIZE`.
pub const STAGING_MAX_OVERFLOW: u32 = 15;
/// Staging pool: connection recycle age in seconds.
pub const STAGING_POOL_RECYCLE_SECS: u64 = 1800;
/// Staging pool: checkout timeout in seconds.
pub const STAGING_POOL_TIMEOUT_SECS: u64 = 20;

// =============================================================================
// Telemetry
// =============================================================================

/// Service name used when neither `OTEL_SERVICE_NAME` nor `APP_NAME` is set.
pub const DEFAULT_SERVICE_NAME: &str = "backend";
