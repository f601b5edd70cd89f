//! Settings type definitions.
//!
//! Responsibilities:
//! - Define the `Settings` record and its grouped sub-records.
//! - Define the closed enums (`Environment`, `LogLevel`, `LogFormat`) and `ConnectionString`.
//!
//! Does NOT handle:
//! - Reading or coercing raw values (see `loader` module).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Nothing in this module serializes a secret or a connection-string password.

mod connection;
mod environment;
mod settings;

pub use connection::ConnectionString;
pub use environment::{Environment, LogFormat, LogLevel, UnknownVariant};
pub use settings::{
    AppSettings, CelerySettings, DatabaseSettings, JwtSettings, PoolConfig, RedisSettings,
    ServerSettings, Settings, TelemetrySettings,
};
