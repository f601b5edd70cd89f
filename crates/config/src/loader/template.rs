//! Env template rendering.
//!
//! Produces an annotated `.env.example` from the declared field table. Required
//! keys are emitted with an empty value so that loading the untouched template
//! still fails with `missing` for each of them.

use std::fmt::Write as _;

use super::fields::{self, Field};

fn render_field(out: &mut String, field: &Field) {
    let marker = if field.required { " (required)" } else { "" };
    let _ = writeln!(out, "# {}{}", field.description, marker);
    match (field.required, field.default) {
        (true, _) => {
            let _ = writeln!(out, "{}=", field.key);
        }
        (false, Some(default)) => {
            let _ = writeln!(out, "{}={}", field.key, default);
        }
        (false, None) => {
            let _ = writeln!(out, "# {}=", field.key);
        }
    }
}

/// Render an env file listing every declared key with its default.
pub fn render_env_template() -> String {
    let mut out = String::new();
    out.push_str("# Backend settings. Copy to .env and fill in the required values.\n");
    out.push_str("# Environment variables with the same names override this file.\n");

    let mut section = "";
    for field in fields::ALL {
        if field.section != section {
            section = field.section;
            let _ = write!(out, "\n# --- {section} ---\n");
        }
        render_field(&mut out, field);
    }
    out
}
