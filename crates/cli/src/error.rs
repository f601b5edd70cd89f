//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that deploy scripts can use to tell a bad
//!   configuration apart from other failures.
//! - Map `ConfigError` and command errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by the error's Display).
//!
//! Invariants:
//! - Every configuration problem exits with 78 (`EX_CONFIG` from sysexits.h).
//! - Anything else that fails exits with 1.

use backend_config::ConfigError;

use crate::commands::check::CheckError;

/// Structured exit codes for the `backend` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - missing or malformed settings, unreadable env
    /// file, or warnings under `check --strict`.
    ///
    /// Scripts should fix the configuration and not retry.
    ConfigurationError = 78,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_err: &ConfigError) -> Self {
        ExitCode::ConfigurationError
    }
}

impl From<&CheckError> for ExitCode {
    fn from(err: &CheckError) -> Self {
        match err {
            CheckError::StrictWarnings { .. } => ExitCode::ConfigurationError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no configuration error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if let Some(check_err) = cause.downcast_ref::<CheckError>() {
                return ExitCode::from(check_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use backend_config::SettingsLoader;

    fn missing_settings_error() -> ConfigError {
        SettingsLoader::new()
            .with_process_env(false)
            .load()
            .unwrap_err()
    }

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::ConfigurationError.as_i32(), 78);
    }

    #[test]
    fn test_config_error_maps_to_configuration_error() {
        let err = missing_settings_error();
        assert_eq!(ExitCode::from(&err), ExitCode::ConfigurationError);
    }

    #[test]
    fn test_config_error_found_in_chain() {
        let err = anyhow::Error::new(missing_settings_error()).context("loading settings");
        assert_eq!(err.exit_code(), ExitCode::ConfigurationError);
    }

    #[test]
    fn test_strict_warnings_map_to_configuration_error() {
        let err: anyhow::Error = CheckError::StrictWarnings { count: 2 }.into();
        assert_eq!(err.exit_code(), ExitCode::ConfigurationError);
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = std::fs::read("/nonexistent/backend/path")
            .context("reading file")
            .unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
        assert_eq!(anyhow::anyhow!("boom").exit_code(), ExitCode::GeneralError);
    }
}
