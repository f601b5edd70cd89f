//! Merged raw values and per-type coercion.
//!
//! Responsibilities:
//! - Hold the merged `KEY -> value` map produced from env files, the process
//!   environment and explicit overrides.
//! - Coerce a declared field's raw value to its Rust type, falling back to the
//!   field's declared default.
//!
//! Does NOT handle:
//! - Deciding source precedence (callers insert lowest priority first).
//! - Assembling the `Settings` record (see builder.rs).
//!
//! Invariants:
//! - Keys are stored upper-cased; values are stored exactly as given so quoted
//!   whitespace survives into strings and secrets.
//! - Typed coercions (integers, booleans, enums, URLs, lists) trim first.
//! - Empty or whitespace-only values are treated as unset and never shadow a
//!   value from a lower-priority source.
//! - Error details for secret fields never echo the rejected value.

use secrecy::SecretString;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use url::Url;

use super::error::{ConfigError, Reason};
use super::fields::Field;
use crate::types::{ConnectionString, UnknownVariant};

/// Merged raw values, keyed by upper-cased env key.
#[derive(Debug, Default, Clone)]
pub(crate) struct RawValues {
    values: BTreeMap<String, String>,
}

pub(crate) fn field_error(field: &Field, reason: Reason, detail: impl Into<String>) -> ConfigError {
    ConfigError::Field {
        field: field.name,
        key: field.key,
        reason,
        detail: detail.into(),
    }
}

impl RawValues {
    /// Insert a value, replacing any lower-priority value for the same key.
    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        self.values
            .insert(key.trim().to_ascii_uppercase(), value.to_string());
    }

    /// The explicitly provided value for `field`, ignoring its default.
    pub(crate) fn provided(&self, field: &Field) -> Option<&str> {
        self.values.get(field.key).map(String::as_str)
    }

    /// The provided value, or the field's default.
    fn raw(&self, field: &Field) -> Option<&str> {
        self.provided(field).or(field.default)
    }

    fn require(&self, field: &Field) -> Result<&str, ConfigError> {
        self.raw(field).ok_or_else(|| {
            field_error(
                field,
                Reason::Missing,
                "no value in env files or environment",
            )
        })
    }

    fn require_trimmed(&self, field: &Field) -> Result<&str, ConfigError> {
        self.require(field).map(str::trim)
    }

    pub(crate) fn string(&self, field: &Field) -> Result<String, ConfigError> {
        self.require(field).map(str::to_string)
    }

    pub(crate) fn optional_string(&self, field: &Field) -> Option<String> {
        self.raw(field).map(str::to_string)
    }

    pub(crate) fn secret(&self, field: &Field) -> Result<SecretString, ConfigError> {
        let raw = self.require(field)?;
        Ok(SecretString::new(raw.into()))
    }

    pub(crate) fn optional_secret(&self, field: &Field) -> Option<SecretString> {
        self.raw(field).map(|raw| SecretString::new(raw.into()))
    }

    pub(crate) fn connection_string(&self, field: &Field) -> Result<ConnectionString, ConfigError> {
        let raw = self.require(field)?;
        ConnectionString::parse(raw).ok_or_else(|| {
            field_error(
                field,
                Reason::InvalidType,
                "expected a connection string without whitespace",
            )
        })
    }

    /// Parse an unsigned decimal integer no smaller than `min`.
    ///
    /// Signs are rejected along with any other non-digit input.
    pub(crate) fn integer<T>(&self, field: &Field, min: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        let raw = self.require_trimmed(field)?;
        let invalid = || {
            field_error(
                field,
                Reason::InvalidType,
                format!("expected a non-negative integer, got '{raw}'"),
            )
        };
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: T = raw.parse().map_err(|_| invalid())?;
        if value < min {
            return Err(field_error(
                field,
                Reason::OutOfRange,
                format!("must be at least {min}, got {value}"),
            ));
        }
        Ok(value)
    }

    pub(crate) fn boolean(&self, field: &Field) -> Result<bool, ConfigError> {
        let raw = self.require_trimmed(field)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(field_error(
                field,
                Reason::InvalidType,
                format!("expected true or false, got '{raw}'"),
            )),
        }
    }

    pub(crate) fn enumeration<E>(&self, field: &Field) -> Result<E, ConfigError>
    where
        E: FromStr<Err = UnknownVariant>,
    {
        let raw = self.require_trimmed(field)?;
        raw.parse()
            .map_err(|err: UnknownVariant| field_error(field, Reason::InvalidEnumValue, err.to_string()))
    }

    pub(crate) fn url(&self, field: &Field) -> Result<Url, ConfigError> {
        let raw = self.require_trimmed(field)?;
        parse_url(field, raw)
    }

    pub(crate) fn optional_url(&self, field: &Field) -> Result<Option<Url>, ConfigError> {
        self.raw(field)
            .map(|raw| parse_url(field, raw.trim()))
            .transpose()
    }

    /// Parse a list given either as a JSON array of strings or comma separated.
    ///
    /// An unquoted `KEY=["a","b"]` line reaches us as `[a,b]` because the env
    /// file parser consumes the inner double quotes; a bracketed value that is
    /// not valid JSON is therefore read as a comma separated list.
    pub(crate) fn list(&self, field: &Field) -> Result<Vec<String>, ConfigError> {
        let raw = self.require_trimmed(field)?;
        let Some(body) = raw.strip_prefix('[') else {
            return Ok(split_list(raw));
        };
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(items) => Ok(items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()),
            Err(e) => match body.strip_suffix(']') {
                Some(inner) => Ok(split_list(inner)),
                None => Err(field_error(
                    field,
                    Reason::InvalidType,
                    format!("expected a JSON array of strings: {e}"),
                )),
            },
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_url(field: &Field, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| {
        field_error(
            field,
            Reason::InvalidType,
            format!("expected an absolute URL (e.g. http://localhost:4317): {e}"),
        )
    })
}
