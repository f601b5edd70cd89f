//! Connection strings for the database, cache and task broker.
//!
//! Responsibilities:
//! - Hold a DSN exactly as configured so drivers receive it untouched.
//! - Render a redacted form that is safe to log or print.
//!
//! Does NOT handle:
//! - Opening connections (no network access happens in this crate).
//! - Driver-specific validation; any whitespace-free value is accepted because
//!   drivers accept DSNs that are not strict URLs (e.g. `sqlite:///./app.db`).
//!
//! Invariants:
//! - `Debug`, `Display` and `Serialize` never include the password component.
//! - `expose()` is the only way to read the raw value.

use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

use crate::constants::REDACTED;

/// A URI-shaped value naming a network endpoint and its credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
}

impl ConnectionString {
    /// Wrap a raw DSN.
    ///
    /// Returns `None` for empty values or values containing whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
        })
    }

    /// The raw value, including credentials. Hand this to drivers only.
    pub fn expose(&self) -> &str {
        &self.raw
    }

    /// The value parsed as a URL with an authority part, if it is one.
    pub fn url(&self) -> Option<Url> {
        Url::parse(&self.raw).ok().filter(Url::has_host)
    }

    /// The URL scheme (e.g. `postgresql`, `redis`), if the value has one.
    pub fn scheme(&self) -> Option<String> {
        self.url().map(|url| url.scheme().to_string())
    }

    /// The value with any password replaced by `********`.
    ///
    /// Values that do not parse as URLs but still carry a `user@` prefix have
    /// everything before the last `@` masked.
    pub fn redacted(&self) -> String {
        match self.url() {
            Some(mut url) if url.password().is_some() => match url.set_password(Some(REDACTED)) {
                Ok(()) => url.to_string(),
                Err(()) => mask_userinfo(&self.raw),
            },
            Some(url) => url.to_string(),
            None => mask_userinfo(&self.raw),
        }
    }
}

/// Mask everything before the last `@`, leaving values without one untouched.
fn mask_userinfo(raw: &str) -> String {
    match raw.rsplit_once('@') {
        Some((_, host)) => format!("{REDACTED}@{host}"),
        None => raw.to_string(),
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionString")
            .field(&self.redacted())
            .finish()
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl Serialize for ConnectionString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.redacted())
    }
}
