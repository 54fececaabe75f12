use std::{env, path::PathBuf};

use once_cell::sync::Lazy;

use crate::constants::{defaults, envvars};

/// Schema file named in the environment; `None` selects the built-in reference schema
pub static SCHEMA_FILE: Lazy<Option<PathBuf>> = Lazy::new(schema_file_from_env);

pub static OUT_DIR: Lazy<PathBuf> = Lazy::new(out_dir_from_env);

pub fn schema_file_from_env() -> Option<PathBuf> {
    env::var_os(envvars::SCHEMA_FILE)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

pub fn out_dir_from_env() -> PathBuf {
    match env::var_os(envvars::OUT_DIR) {
        Some(out_dir) if !out_dir.is_empty() => out_dir.into(),
        _ => PathBuf::from(defaults::OUT_DIR),
    }
}
