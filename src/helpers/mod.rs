mod load_dotenv;

pub use load_dotenv::load_dotenv;

pub mod base_path;

use std::env;

use crate::constants::{defaults, envvars};

/// Output format named in the environment, `cpp` if unset
pub fn output_format() -> String {
    env::var(envvars::FORMAT)
        .ok()
        .filter(|format| !format.trim().is_empty())
        .unwrap_or_else(|| defaults::FORMAT.to_string())
}
