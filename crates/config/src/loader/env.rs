//! Process environment and env file sources.
//!
//! Responsibilities:
//! - Read declared keys from the process environment.
//! - Read `KEY=VALUE` env files without touching the process environment.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Coercing values to their declared types (see values.rs).
//! - Deciding which files to read (see builder.rs).
//!
//! Invariants:
//! - Only declared keys are read from the process environment.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - A declared key holding non-UTF-8 bytes is an `invalid_type` error, never
//!   silently treated as unset.
//! - A missing env file is skipped, never an error.
//! - Env file errors report the byte index only, never line contents.

use std::env::VarError;
use std::path::Path;

use super::error::{ConfigError, Reason};
use super::fields;
use super::values::{RawValues, field_error};
use crate::constants::DOTENV_DISABLED_VAR;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Check if env file loading is disabled via `DOTENV_DISABLED`.
pub(crate) fn dotenv_disabled() -> bool {
    matches!(
        env_var_or_none(DOTENV_DISABLED_VAR).as_deref(),
        Some("true") | Some("1")
    )
}

/// Overlay every declared key present in the process environment.
///
/// Values are trimmed; blank values are skipped by `RawValues::insert`.
pub(crate) fn apply_process_env(values: &mut RawValues) -> Result<(), ConfigError> {
    for field in fields::ALL {
        match std::env::var(field.key) {
            Ok(value) => values.insert(field.key, value.trim()),
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                return Err(field_error(
                    field,
                    Reason::InvalidType,
                    "environment value is not valid UTF-8",
                ));
            }
        }
    }
    Ok(())
}

/// Overlay the entries of one env file.
///
/// Returns the number of entries read; a missing file reads as zero entries.
pub(crate) fn apply_env_file(path: &Path, values: &mut RawValues) -> Result<usize, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if is_not_found(&e) => {
            tracing::debug!(path = %path.display(), "env file not found, skipping");
            return Ok(0);
        }
        Err(e) => return Err(map_dotenv_error(path, e)),
    };

    let mut entries = 0;
    for item in iter {
        let (key, value) = item.map_err(|e| map_dotenv_error(path, e))?;
        values.insert(&key, &value);
        entries += 1;
    }

    tracing::debug!(path = %path.display(), entries, "loaded env file");
    Ok(entries)
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

fn map_dotenv_error(path: &Path, err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::LineParse(_, idx) => ConfigError::EnvFileParse {
            path: path.to_path_buf(),
            error_index: idx,
        },
        dotenvy::Error::Io(io_err) => ConfigError::EnvFileIo {
            path: path.to_path_buf(),
            kind: io_err.kind(),
        },
        _ => ConfigError::EnvFileUnknown {
            path: path.to_path_buf(),
        },
    }
}
