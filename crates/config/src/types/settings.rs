//! The validated settings record and its derived views.
//!
//! Responsibilities:
//! - Define `Settings`, grouped into app/server/database/redis/jwt/celery/telemetry records.
//! - Provide derived values (pool presets, token lifetimes, OTLP headers).
//! - Report advisory security findings that do not block startup.
//!
//! Does NOT handle:
//! - Loading or coercing values (see `loader`).
//! - Initialising logging or exporters (see the CLI crate).
//!
//! Invariants:
//! - A `Settings` value is only produced by `SettingsLoader::load`, fully validated.
//! - Secrets are `SecretString` and serialize as `********`.
//! - Serialized output is safe to print: connection strings are redacted.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use std::time::Duration;
use url::Url;

use super::connection::ConnectionString;
use super::environment::{Environment, LogFormat, LogLevel};
use crate::constants::{
    DEFAULT_SERVICE_NAME, MIN_SECRET_LEN, PRODUCTION_MAX_OVERFLOW, PRODUCTION_POOL_RECYCLE_SECS,
    PRODUCTION_POOL_SIZE, PRODUCTION_POOL_TIMEOUT_SECS, REDACTED, STAGING_MAX_OVERFLOW,
    STAGING_POOL_RECYCLE_SECS, STAGING_POOL_SIZE, STAGING_POOL_TIMEOUT_SECS,
};

/// Serializes any secret as the redaction marker.
mod redacted_secret {
    use super::REDACTED;
    use secrecy::SecretString;
    use serde::Serializer;

    pub fn serialize<S>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }
}

fn serialize_optional_secret<S>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(_) => serializer.serialize_some(REDACTED),
        None => serializer.serialize_none(),
    }
}

fn secrets_equal(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret() == b.expose_secret()
}

/// Fully validated process settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub environment: Environment,
    pub app: AppSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub jwt: JwtSettings,
    pub celery: CelerySettings,
    pub telemetry: TelemetrySettings,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

/// Application identity and the application-wide signing secret.
#[derive(Debug, Clone, Serialize)]
pub struct AppSettings {
    pub name: Option<String>,
    pub version: String,
    /// Path prefix for versioned API routes (e.g. `/api`).
    pub api_prefix: String,
    #[serde(with = "redacted_secret")]
    pub secret_key: SecretString,
}

impl PartialEq for AppSettings {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.api_prefix == other.api_prefix
            && secrets_equal(&self.secret_key, &other.secret_key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Public URL the service is reachable at.
    pub base_url: Url,
    pub debug: bool,
    /// Allowed CORS origins; empty means no cross-origin access.
    pub cors_origins: Vec<String>,
}

/// Database connection and pool settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseSettings {
    pub url: ConnectionString,
    pub pool_size: u32,
    pub max_overflow: u32,
    pub pool_recycle_seconds: u64,
    pub pool_timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub pool_pre_ping: bool,
    /// Log every statement the ORM issues.
    pub echo: bool,
}

/// Effective connection pool parameters for one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolConfig {
    pub pool_size: u32,
    pub max_overflow: u32,
    #[serde(with = "duration_seconds")]
    pub pool_recycle: Duration,
    #[serde(with = "duration_seconds")]
    pub pool_timeout: Duration,
    pub pool_pre_ping: bool,
}

impl PoolConfig {
    /// Upper bound on simultaneously open connections.
    pub fn max_connections(&self) -> u32 {
        self.pool_size.saturating_add(self.max_overflow)
    }
}

impl DatabaseSettings {
    /// Pool parameters for `environment`.
    ///
    /// Production and staging use fixed presets; development uses the configured values.
    pub fn pool_config(&self, environment: Environment) -> PoolConfig {
        match environment {
            Environment::Production => PoolConfig {
                pool_size: PRODUCTION_POOL_SIZE,
                max_overflow: PRODUCTION_MAX_OVERFLOW,
                pool_recycle: Duration::from_secs(PRODUCTION_POOL_RECYCLE_SECS),
                pool_timeout: Duration::from_secs(PRODUCTION_POOL_TIMEOUT_SECS),
                pool_pre_ping: true,
            },
            Environment::Staging => PoolConfig {
                pool_size: STAGING_POOL_SIZE,
                max_overflow: STAGING_MAX_OVERFLOW,
                pool_recycle: Duration::from_secs(STAGING_POOL_RECYCLE_SECS),
                pool_timeout: Duration::from_secs(STAGING_POOL_TIMEOUT_SECS),
                pool_pre_ping: true,
            },
            Environment::Development => PoolConfig {
                pool_size: self.pool_size,
                max_overflow: self.max_overflow,
                pool_recycle: Duration::from_secs(self.pool_recycle_seconds),
                pool_timeout: Duration::from_secs(self.pool_timeout_seconds),
                pool_pre_ping: self.pool_pre_ping,
            },
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedisSettings {
    pub url: ConnectionString,
    /// Default cache entry lifetime; 0 disables expiry.
    pub cache_ttl_seconds: u64,
    pub max_connections: u32,
}

impl RedisSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

/// Token signing parameters.
#[derive(Debug, Clone, Serialize)]
pub struct JwtSettings {
    #[serde(with = "redacted_secret")]
    pub secret_key: SecretString,
    pub algorithm: String,
    pub access_token_expire_minutes: u64,
    pub refresh_token_expire_minutes: u64,
}

impl PartialEq for JwtSettings {
    fn eq(&self, other: &Self) -> bool {
        secrets_equal(&self.secret_key, &other.secret_key)
            && self.algorithm == other.algorithm
            && self.access_token_expire_minutes == other.access_token_expire_minutes
            && self.refresh_token_expire_minutes == other.refresh_token_expire_minutes
    }
}

impl JwtSettings {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_expire_minutes.saturating_mul(60))
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expire_minutes.saturating_mul(60))
    }
}

/// Background task broker settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelerySettings {
    pub broker_url: ConnectionString,
    pub result_backend: ConnectionString,
    /// Run tasks inline instead of dispatching them to workers.
    pub task_always_eager: bool,
}

/// OpenTelemetry exporter settings.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetrySettings {
    pub enabled: bool,
    pub service_name: Option<String>,
    pub exporter_otlp_endpoint: Option<Url>,
    /// Raw `k=v,k2=v2` header list; usually carries a bearer token.
    #[serde(serialize_with = "serialize_optional_secret")]
    pub exporter_otlp_headers: Option<SecretString>,
}

impl PartialEq for TelemetrySettings {
    fn eq(&self, other: &Self) -> bool {
        let headers_equal = match (&self.exporter_otlp_headers, &other.exporter_otlp_headers) {
            (Some(a), Some(b)) => secrets_equal(a, b),
            (None, None) => true,
            _ => false,
        };
        self.enabled == other.enabled
            && self.service_name == other.service_name
            && self.exporter_otlp_endpoint == other.exporter_otlp_endpoint
            && headers_equal
    }
}

impl TelemetrySettings {
    /// Exporter headers as ordered `(key, value)` pairs.
    ///
    /// Entries are comma separated and split on the first `=`; a value wrapped
    /// in double quotes has them removed. Entries without `=` are skipped.
    pub fn headers(&self) -> Vec<(String, String)> {
        let Some(raw) = self.exporter_otlp_headers.as_ref() else {
            return Vec::new();
        };
        raw.expose_secret()
            .split(',')
            .filter_map(|entry| {
                let (key, value) = entry.trim().split_once('=')?;
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                Some((key.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Service name reported to the collector.
    pub fn service_name_or<'a>(&'a self, app_name: Option<&'a str>) -> &'a str {
        self.service_name
            .as_deref()
            .or(app_name)
            .unwrap_or(DEFAULT_SERVICE_NAME)
    }

    /// Endpoint to export to, if exporting is switched on and an endpoint is configured.
    pub fn active_endpoint(&self) -> Option<&Url> {
        if self.enabled {
            self.exporter_otlp_endpoint.as_ref()
        } else {
            None
        }
    }
}

impl Settings {
    /// Service name for telemetry, falling back to the app name.
    pub fn service_name(&self) -> &str {
        self.telemetry.service_name_or(self.app.name.as_deref())
    }

    /// Effective pool parameters for the configured environment.
    pub fn pool_config(&self) -> PoolConfig {
        self.database.pool_config(self.environment)
    }

    /// Advisory findings that should be fixed but do not prevent startup.
    pub fn security_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.environment.is_production() && self.server.debug {
            warnings.push("DEBUG is enabled in production".to_string());
        }

        if secrets_equal(&self.app.secret_key, &self.jwt.secret_key) {
            warnings.push("JWT_SECRET_KEY reuses SECRET_KEY; use a dedicated signing key".to_string());
        }

        if self.environment != Environment::Development {
            for (key, secret) in [
                ("SECRET_KEY", &self.app.secret_key),
                ("JWT_SECRET_KEY", &self.jwt.secret_key),
            ] {
                if secret.expose_secret().len() < MIN_SECRET_LEN {
                    warnings.push(format!(
                        "{key} is shorter than {MIN_SECRET_LEN} characters"
                    ));
                }
            }
        }

        if self.telemetry.enabled && self.telemetry.exporter_otlp_endpoint.is_none() {
            warnings.push(
                "OTEL_ENABLED is set but OTEL_EXPORTER_OTLP_ENDPOINT is missing; spans will not be exported"
                    .to_string(),
            );
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dsn(raw: &str) -> ConnectionString {
        ConnectionString::parse(raw).unwrap()
    }

    fn secret(raw: &str) -> SecretString {
        SecretString::new(raw.into())
    }

    fn sample() -> Settings {
        Settings {
            environment: Environment::Development,
            app: AppSettings {
                name: Some("orders".to_string()),
                version: "0.1.0".to_string(),
                api_prefix: "/api".to_string(),
                secret_key: secret("app-secret-app-secret-app-secret-xx"),
            },
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
                base_url: Url::parse("http://localhost:8000").unwrap(),
                debug: false,
                cors_origins: Vec::new(),
            },
            database: DatabaseSettings {
                url: dsn("postgresql://app:pw@localhost:5432/orders"),
                pool_size: 20,
                max_overflow: 0,
                pool_recycle_seconds: 3600,
                pool_timeout_seconds: 30,
                connect_timeout_seconds: 10,
                pool_pre_ping: false,
                echo: false,
            },
            redis: RedisSettings {
                url: dsn("redis://localhost:6379/0"),
                cache_ttl_seconds: 3600,
                max_connections: 100,
            },
            jwt: JwtSettings {
                secret_key: secret("jwt-secret-jwt-secret-jwt-secret-xx"),
                algorithm: "HS256".to_string(),
                access_token_expire_minutes: 30,
                refresh_token_expire_minutes: 10080,
            },
            celery: CelerySettings {
                broker_url: dsn("redis://localhost:6379/1"),
                result_backend: dsn("redis://localhost:6379/2"),
                task_always_eager: false,
            },
            telemetry: TelemetrySettings {
                enabled: false,
                service_name: None,
                exporter_otlp_endpoint: None,
                exporter_otlp_headers: None,
            },
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn test_pool_config_presets() {
        let settings = sample();

        let dev = settings.database.pool_config(Environment::Development);
        assert_eq!(dev.pool_size, 20);
        assert_eq!(dev.max_overflow, 0);
        assert!(!dev.pool_pre_ping);

        let prod = settings.database.pool_config(Environment::Production);
        assert_eq!(prod.pool_size, 20);
        assert_eq!(prod.max_overflow, 30);
        assert_eq!(prod.max_connections(), 50);
        assert!(prod.pool_pre_ping);

        let staging = settings.database.pool_config(Environment::Staging);
        assert_eq!(staging.pool_recycle, Duration::from_secs(1800));
        assert_eq!(staging.pool_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_token_lifetimes() {
        let settings = sample();
        assert_eq!(settings.jwt.access_token_ttl(), Duration::from_secs(30 * 60));
        assert_eq!(
            settings.jwt.refresh_token_ttl(),
            Duration::from_secs(7 * 24 * 60 * 60)
        );
    }

    #[test]
    fn test_headers_parsing() {
        let mut telemetry = sample().telemetry;
        telemetry.exporter_otlp_headers = Some(secret(
            "authorization=Bearer abc=def, x-team=\"core\",broken, =novalue",
        ));
        assert_eq!(
            telemetry.headers(),
            vec![
                ("authorization".to_string(), "Bearer abc=def".to_string()),
                ("x-team".to_string(), "core".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_empty_when_unset() {
        assert!(sample().telemetry.headers().is_empty());
    }

    #[test]
    fn test_service_name_fallbacks() {
        let mut settings = sample();
        assert_eq!(settings.service_name(), "orders");

        settings.telemetry.service_name = Some("orders-api".to_string());
        assert_eq!(settings.service_name(), "orders-api");

        settings.telemetry.service_name = None;
        settings.app.name = None;
        assert_eq!(settings.service_name(), DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn test_active_endpoint_requires_enabled() {
        let mut telemetry = sample().telemetry;
        telemetry.exporter_otlp_endpoint = Some(Url::parse("http://collector:4317").unwrap());
        assert!(telemetry.active_endpoint().is_none());
        telemetry.enabled = true;
        assert!(telemetry.active_endpoint().is_some());
    }

    #[test]
    fn test_security_warnings() {
        let mut settings = sample();
        assert!(settings.security_warnings().is_empty());

        settings.environment = Environment::Production;
        settings.server.debug = true;
        settings.jwt.secret_key = secret("short");
        let warnings = settings.security_warnings();
        assert!(warnings.iter().any(|w| w.contains("DEBUG")));
        assert!(warnings.iter().any(|w| w.starts_with("JWT_SECRET_KEY is shorter")));
        assert!(!warnings.iter().any(|w| w.starts_with("SECRET_KEY is shorter")));
    }

    #[test]
    fn test_shared_secret_is_reported() {
        let mut settings = sample();
        settings.jwt.secret_key = settings.app.secret_key.clone();
        assert!(
            settings
                .security_warnings()
                .iter()
                .any(|w| w.contains("reuses SECRET_KEY"))
        );
    }

    #[test]
    fn test_serialization_redacts_secrets() {
        let mut settings = sample();
        settings.telemetry.exporter_otlp_headers = Some(secret("authorization=Bearer tok"));
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("app-secret"));
        assert!(!json.contains("jwt-secret"));
        assert!(!json.contains(":pw@"));
        assert!(!json.contains("Bearer tok"));
        assert!(json.contains(REDACTED));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", sample());
        assert!(!debug.contains("app-secret"));
        assert!(!debug.contains(":pw@"));
    }
}
