//! Error types for settings loading.
//!
//! Responsibilities:
//! - Define the single error type returned by `SettingsLoader::load`.
//! - Carry the offending field, its env key and a machine-readable reason code.
//!
//! Does NOT handle:
//! - Mapping errors to process exit codes (see the CLI crate).
//!
//! Invariants:
//! - Every field error names both the settings field and its env key.
//! - Env file errors NEVER include raw line contents to prevent secret leakage.
//! - Field errors never include the rejected value of a secret field.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// No source provided a value and the field has no default.
    Missing,
    /// The value could not be coerced to the field's declared type.
    InvalidType,
    /// The value is not one of the field's declared enum values.
    InvalidEnumValue,
    /// The value has the right type but violates the field's bounds.
    OutOfRange,
}

impl Reason {
    /// Stable reason code, suitable for scripts and structured logs.
    pub fn code(self) -> &'static str {
        match self {
            Reason::Missing => "missing",
            Reason::InvalidType => "invalid_type",
            Reason::InvalidEnumValue => "invalid_enum_value",
            Reason::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A declared field is absent or malformed.
    #[error("{key} ({field}): {reason}: {detail}")]
    Field {
        field: &'static str,
        key: &'static str,
        reason: Reason,
        detail: String,
    },

    /// An env file has invalid syntax.
    ///
    /// SAFETY: Only the byte index of the failure is reported, not the line.
    #[error(
        "failed to parse env file {} at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip env files",
        path.display()
    )]
    EnvFileParse { path: PathBuf, error_index: usize },

    /// An env file exists but could not be read.
    #[error("failed to read env file {}: {kind}", path.display())]
    EnvFileIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("failed to load env file {}", path.display())]
    EnvFileUnknown { path: PathBuf },
}

impl ConfigError {
    /// The settings field this error is about, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Field { field, .. } => Some(field),
            _ => None,
        }
    }

    /// The reason code, if this error concerns a single field.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            ConfigError::Field { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
