//! Check command: validate settings and report security warnings.
//!
//! Responsibilities:
//! - Print a one-line summary of the validated settings.
//! - Print advisory security warnings to stderr.
//! - Fail with `CheckError` under `--strict` when any warning was reported.
//!
//! Does NOT handle:
//! - Loading settings (a load failure exits before this command runs).

use anyhow::Result;
use backend_config::Settings;
use tracing::{info, warn};

/// Failures specific to the check command.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{count} security warning(s) reported and --strict is set")]
    StrictWarnings { count: usize },
}

/// One-line summary of the validated settings; never includes secrets.
pub fn summary(settings: &Settings) -> String {
    let pool = settings.pool_config();
    format!(
        "configuration OK: environment={} service={} log_level={} database={} pool={}+{}",
        settings.environment,
        settings.service_name(),
        settings.log_level,
        settings.database.url.redacted(),
        pool.pool_size,
        pool.max_overflow,
    )
}

pub fn run(settings: &Settings, strict: bool) -> Result<()> {
    info!(environment = %settings.environment, "settings validated");
    println!("{}", summary(settings));

    let warnings = settings.security_warnings();
    for warning in &warnings {
        warn!(warning = %warning, "security warning");
        eprintln!("warning: {warning}");
    }

    if strict && !warnings.is_empty() {
        return Err(CheckError::StrictWarnings {
            count: warnings.len(),
        }
        .into());
    }
    Ok(())
}
