//! Template command: print the annotated env template.
//!
//! Runs without loading settings so it works in an unconfigured checkout.

use backend_config::render_env_template;

pub fn run() {
    print!("{}", render_env_template());
}
