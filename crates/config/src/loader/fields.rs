//! Declared settings fields.
//!
//! Every key the loader reads is declared here once, with its default and a
//! one-line description. The loader, the error messages and the env template
//! all read from this table, so a field cannot be documented with one default
//! and loaded with another.
//!
//! Invariants:
//! - `key` is `name` upper-cased, except where the env key predates the field name.
//! - Required fields have no default.
//! - Defaults are written in the same syntax a user would put in an env file.

/// One declared settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Settings field name used in error reports.
    pub name: &'static str,
    /// Environment / env file key.
    pub key: &'static str,
    /// Default value in env file syntax; `None` for fields without one.
    pub default: Option<&'static str>,
    /// Whether loading fails when no source provides a value.
    pub required: bool,
    /// Template section this field is listed under.
    pub section: &'static str,
    pub description: &'static str,
}

const fn required(
    name: &'static str,
    key: &'static str,
    section: &'static str,
    description: &'static str,
) -> Field {
    Field {
        name,
        key,
        default: None,
        required: true,
        section,
        description,
    }
}

const fn defaulted(
    name: &'static str,
    key: &'static str,
    default: &'static str,
    section: &'static str,
    description: &'static str,
) -> Field {
    Field {
        name,
        key,
        default: Some(default),
        required: false,
        section,
        description,
    }
}

const fn optional(
    name: &'static str,
    key: &'static str,
    section: &'static str,
    description: &'static str,
) -> Field {
    Field {
        name,
        key,
        default: None,
        required: false,
        section,
        description,
    }
}

// Application
pub const ENVIRONMENT: Field = defaulted(
    "environment",
    "ENVIRONMENT",
    "development",
    "Application",
    "Deployment environment: development, staging or production",
);
pub const APP_NAME: Field = optional("app_name", "APP_NAME", "Application", "Human-readable service name");
pub const APP_VERSION: Field = defaulted(
    "app_version",
    "APP_VERSION",
    "0.1.0",
    "Application",
    "Version reported by the service",
);
pub const API_PREFIX: Field = defaulted(
    "api_prefix",
    "API_V1_STR",
    "/api",
    "Application",
    "Path prefix for versioned API routes",
);
pub const SECRET_KEY: Field = required(
    "secret_key",
    "SECRET_KEY",
    "Application",
    "Application-wide signing secret",
);

// Server
pub const HOST: Field = defaulted("host", "HOST", "0.0.0.0", "Server", "Interface to bind");
pub const PORT: Field = defaulted("port", "PORT", "8000", "Server", "Port to bind (1-65535)");
pub const BASE_URL: Field = defaulted(
    "base_url",
    "BASE_URL",
    "http://localhost:8000",
    "Server",
    "Public URL of the service",
);
pub const DEBUG: Field = defaulted("debug", "DEBUG", "false", "Server", "Enable debug mode");
pub const CORS_ORIGINS: Field = defaulted(
    "cors_origins",
    "BACKEND_CORS_ORIGINS",
    "[]",
    "Server",
    "Allowed CORS origins: a JSON array or a comma separated list",
);

// Database
pub const DATABASE_URL: Field = required(
    "database_url",
    "DATABASE_URL",
    "Database",
    "Database connection string",
);
pub const DATABASE_POOL_SIZE: Field = defaulted(
    "database_pool_size",
    "DATABASE_POOL_SIZE",
    "20",
    "Database",
    "Connections kept open in development (> 0)",
);
pub const DATABASE_MAX_OVERFLOW: Field = defaulted(
    "database_max_overflow",
    "DATABASE_MAX_OVERFLOW",
    "0",
    "Database",
    "Connections allowed above the pool size in development",
);
pub const DATABASE_POOL_RECYCLE: Field = defaulted(
    "database_pool_recycle",
    "DATABASE_POOL_RECYCLE",
    "3600",
    "Database",
    "Seconds before a pooled connection is recycled",
);
pub const DATABASE_POOL_TIMEOUT: Field = defaulted(
    "database_pool_timeout",
    "DATABASE_POOL_TIMEOUT",
    "30",
    "Database",
    "Seconds to wait for a pooled connection (> 0)",
);
pub const DATABASE_CONNECT_TIMEOUT: Field = defaulted(
    "database_connect_timeout",
    "DATABASE_CONNECT_TIMEOUT",
    "10",
    "Database",
    "Seconds to wait when opening a connection (> 0)",
);
pub const DATABASE_POOL_PRE_PING: Field = defaulted(
    "database_pool_pre_ping",
    "DATABASE_POOL_PRE_PING",
    "false",
    "Database",
    "Ping connections before handing them out in development",
);
pub const DATABASE_ECHO: Field = defaulted(
    "database_echo",
    "DATABASE_ECHO",
    "false",
    "Database",
    "Log every SQL statement",
);

// Redis
pub const REDIS_URL: Field = required("redis_url", "REDIS_URL", "Redis", "Redis connection string");
pub const REDIS_CACHE_TTL: Field = defaulted(
    "redis_cache_ttl",
    "REDIS_CACHE_TTL",
    "3600",
    "Redis",
    "Default cache entry lifetime in seconds (0 disables expiry)",
);
pub const REDIS_MAX_CONNECTIONS: Field = defaulted(
    "redis_max_connections",
    "REDIS_MAX_CONNECTIONS",
    "100",
    "Redis",
    "Maximum Redis connections (> 0)",
);

// JWT
pub const JWT_SECRET_KEY: Field = required(
    "jwt_secret_key",
    "JWT_SECRET_KEY",
    "JWT",
    "Token signing secret",
);
pub const JWT_ALGORITHM: Field = defaulted(
    "jwt_algorithm",
    "JWT_ALGORITHM",
    "HS256",
    "JWT",
    "Token signing algorithm",
);
pub const JWT_ACCESS_TOKEN_EXPIRE_MINUTES: Field = defaulted(
    "jwt_access_token_expire_minutes",
    "JWT_ACCESS_TOKEN_EXPIRE_MINUTES",
    "30",
    "JWT",
    "Access token lifetime in minutes (> 0)",
);
pub const JWT_REFRESH_TOKEN_EXPIRE_MINUTES: Field = defaulted(
    "jwt_refresh_token_expire_minutes",
    "JWT_REFRESH_TOKEN_EXPIRE_MINUTES",
    "10080",
    "JWT",
    "Refresh token lifetime in minutes (> 0)",
);

// Celery
pub const CELERY_BROKER_URL: Field = required(
    "celery_broker_url",
    "CELERY_BROKER_URL",
    "Celery",
    "Task broker connection string",
);
pub const CELERY_RESULT_BACKEND: Field = required(
    "celery_result_backend",
    "CELERY_RESULT_BACKEND",
    "Celery",
    "Task result backend connection string",
);
pub const CELERY_TASK_ALWAYS_EAGER: Field = defaulted(
    "celery_task_always_eager",
    "CELERY_TASK_ALWAYS_EAGER",
    "false",
    "Celery",
    "Run tasks inline instead of on workers",
);

// Telemetry
pub const OTEL_ENABLED: Field = defaulted(
    "otel_enabled",
    "OTEL_ENABLED",
    "false",
    "Telemetry",
    "Export traces over OTLP",
);
pub const OTEL_SERVICE_NAME: Field = optional(
    "otel_service_name",
    "OTEL_SERVICE_NAME",
    "Telemetry",
    "Service name reported to the collector (defaults to APP_NAME)",
);
pub const OTEL_EXPORTER_OTLP_ENDPOINT: Field = optional(
    "otel_exporter_otlp_endpoint",
    "OTEL_EXPORTER_OTLP_ENDPOINT",
    "Telemetry",
    "OTLP gRPC collector URL",
);
pub const OTEL_EXPORTER_OTLP_HEADERS: Field = optional(
    "otel_exporter_otlp_headers",
    "OTEL_EXPORTER_OTLP_HEADERS",
    "Telemetry",
    "Exporter headers as key=value pairs separated by commas",
);

// Logging
pub const LOG_LEVEL: Field = defaulted(
    "log_level",
    "LOG_LEVEL",
    "INFO",
    "Logging",
    "DEBUG, INFO, WARNING, ERROR or CRITICAL",
);
pub const LOG_FORMAT: Field = defaulted(
    "log_format",
    "LOG_FORMAT",
    "text",
    "Logging",
    "Log line format: text or json",
);

/// All fields in declaration order.
pub const ALL: &[Field] = &[
    ENVIRONMENT,
    APP_NAME,
    APP_VERSION,
    API_PREFIX,
    SECRET_KEY,
    HOST,
    PORT,
    BASE_URL,
    DEBUG,
    CORS_ORIGINS,
    DATABASE_URL,
    DATABASE_POOL_SIZE,
    DATABASE_MAX_OVERFLOW,
    DATABASE_POOL_RECYCLE,
    DATABASE_POOL_TIMEOUT,
    DATABASE_CONNECT_TIMEOUT,
    DATABASE_POOL_PRE_PING,
    DATABASE_ECHO,
    REDIS_URL,
    REDIS_CACHE_TTL,
    REDIS_MAX_CONNECTIONS,
    JWT_SECRET_KEY,
    JWT_ALGORITHM,
    JWT_ACCESS_TOKEN_EXPIRE_MINUTES,
    JWT_REFRESH_TOKEN_EXPIRE_MINUTES,
    CELERY_BROKER_URL,
    CELERY_RESULT_BACKEND,
    CELERY_TASK_ALWAYS_EAGER,
    OTEL_ENABLED,
    OTEL_SERVICE_NAME,
    OTEL_EXPORTER_OTLP_ENDPOINT,
    OTEL_EXPORTER_OTLP_HEADERS,
    LOG_LEVEL,
    LOG_FORMAT,
];

/// Look up a field by its env key.
pub fn by_key(key: &str) -> Option<&'static Field> {
    ALL.iter().find(|field| field.key == key)
}

/// Required fields, in declaration order.
pub fn required_fields() -> impl Iterator<Item = &'static Field> {
    ALL.iter().filter(|field| field.required)
}
