//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for layered settings sources.
//! - Merge env files, the process environment and explicit overrides.
//! - Build the final, fully validated `Settings`.
//!
//! Does NOT handle:
//! - Env file and environment reading details (delegated to env.rs).
//! - Per-type coercion rules (delegated to values.rs).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest first: field defaults, env files in the order given,
//!   the process environment, explicit `with_var` overrides.
//! - `load()` is all-or-nothing and reports the first invalid field in
//!   declaration order.
//! - `load()` never mutates the process environment and performs no network I/O.
//! - `DOTENV_DISABLED` is only honoured when the process environment is consulted.

use std::path::PathBuf;

use super::env::{apply_env_file, apply_process_env, dotenv_disabled};
use super::error::ConfigError;
use super::fields;
use super::values::RawValues;
use crate::constants::DEFAULT_ENV_FILES;
use crate::types::{
    AppSettings, CelerySettings, DatabaseSettings, JwtSettings, RedisSettings, ServerSettings,
    Settings, TelemetrySettings,
};

/// Loader that builds `Settings` from env files and environment variables.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_files: Vec<PathBuf>,
    use_process_env: bool,
    overrides: Vec<(String, String)>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Create a loader with no env files that reads the process environment.
    pub fn new() -> Self {
        Self {
            env_files: Vec::new(),
            use_process_env: true,
            overrides: Vec::new(),
        }
    }

    /// Add an env file. Later files override earlier ones.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_files.push(path.into());
        self
    }

    /// Add several env files, lowest priority first.
    pub fn with_env_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.env_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add `.env`, `.env.local` and `.env.development`, relative to the working directory.
    pub fn with_default_env_files(self) -> Self {
        self.with_env_files(DEFAULT_ENV_FILES.iter().copied())
    }

    /// Whether process environment variables are overlaid on env file values.
    pub fn with_process_env(mut self, enabled: bool) -> Self {
        self.use_process_env = enabled;
        self
    }

    /// Set a value that overrides every other source.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Env files this loader will read, in priority order (lowest first).
    pub fn env_files(&self) -> &[PathBuf] {
        &self.env_files
    }

    fn env_files_enabled(&self) -> bool {
        !(self.use_process_env && dotenv_disabled())
    }

    /// Merge all sources into raw values without validating them.
    pub(crate) fn collect(&self) -> Result<RawValues, ConfigError> {
        let mut values = RawValues::default();

        if self.env_files_enabled() {
            for path in &self.env_files {
                apply_env_file(path, &mut values)?;
            }
        } else if !self.env_files.is_empty() {
            tracing::debug!("env files disabled by DOTENV_DISABLED");
        }

        if self.use_process_env {
            apply_process_env(&mut values)?;
        }

        for (key, value) in &self.overrides {
            values.insert(key, value);
        }

        Ok(values)
    }

    /// Load and validate settings from all configured sources.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Field` naming the first field (in declaration
    /// order) that is missing or malformed, or an env file error if a file
    /// exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let values = self.collect()?;
        build_settings(&values)
    }
}

/// Build the settings record from merged raw values.
///
/// Fields are coerced in declaration order so the first reported error is deterministic.
pub(crate) fn build_settings(values: &RawValues) -> Result<Settings, ConfigError> {
    let environment = values.enumeration(&fields::ENVIRONMENT)?;

    let app = AppSettings {
        name: values.optional_string(&fields::APP_NAME),
        version: values.string(&fields::APP_VERSION)?,
        api_prefix: values.string(&fields::API_PREFIX)?,
        secret_key: values.secret(&fields::SECRET_KEY)?,
    };

    let server = ServerSettings {
        host: values.string(&fields::HOST)?,
        port: values.integer(&fields::PORT, 1u16)?,
        base_url: values.url(&fields::BASE_URL)?,
        debug: values.boolean(&fields::DEBUG)?,
        cors_origins: values.list(&fields::CORS_ORIGINS)?,
    };

    let database = DatabaseSettings {
        url: values.connection_string(&fields::DATABASE_URL)?,
        pool_size: values.integer(&fields::DATABASE_POOL_SIZE, 1u32)?,
        max_overflow: values.integer(&fields::DATABASE_MAX_OVERFLOW, 0u32)?,
        pool_recycle_seconds: values.integer(&fields::DATABASE_POOL_RECYCLE, 0u64)?,
        pool_timeout_seconds: values.integer(&fields::DATABASE_POOL_TIMEOUT, 1u64)?,
        connect_timeout_seconds: values.integer(&fields::DATABASE_CONNECT_TIMEOUT, 1u64)?,
        pool_pre_ping: values.boolean(&fields::DATABASE_POOL_PRE_PING)?,
        echo: values.boolean(&fields::DATABASE_ECHO)?,
    };

    let redis = RedisSettings {
        url: values.connection_string(&fields::REDIS_URL)?,
        cache_ttl_seconds: values.integer(&fields::REDIS_CACHE_TTL, 0u64)?,
        max_connections: values.integer(&fields::REDIS_MAX_CONNECTIONS, 1u32)?,
    };

    let jwt = JwtSettings {
        secret_key: values.secret(&fields::JWT_SECRET_KEY)?,
        algorithm: values.string(&fields::JWT_ALGORITHM)?,
        access_token_expire_minutes: values
            .integer(&fields::JWT_ACCESS_TOKEN_EXPIRE_MINUTES, 1u64)?,
        refresh_token_expire_minutes: values
            .integer(&fields::JWT_REFRESH_TOKEN_EXPIRE_MINUTES, 1u64)?,
    };

    let celery = CelerySettings {
        broker_url: values.connection_string(&fields::CELERY_BROKER_URL)?,
        result_backend: values.connection_string(&fields::CELERY_RESULT_BACKEND)?,
        task_always_eager: values.boolean(&fields::CELERY_TASK_ALWAYS_EAGER)?,
    };

    let telemetry = TelemetrySettings {
        enabled: values.boolean(&fields::OTEL_ENABLED)?,
        service_name: values.optional_string(&fields::OTEL_SERVICE_NAME),
        exporter_otlp_endpoint: values.optional_url(&fields::OTEL_EXPORTER_OTLP_ENDPOINT)?,
        exporter_otlp_headers: values.optional_secret(&fields::OTEL_EXPORTER_OTLP_HEADERS),
    };

    let log_level = values.enumeration(&fields::LOG_LEVEL)?;
    let log_format = values.enumeration(&fields::LOG_FORMAT)?;

    Ok(Settings {
        environment,
        app,
        server,
        database,
        redis,
        jwt,
        celery,
        telemetry,
        log_level,
        log_format,
    })
}
