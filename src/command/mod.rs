mod check;
mod generate;
mod query;

pub use check::{check, codes};
pub use generate::generate;
pub use query::{compatible, label, usage};

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use plugc::compile::{self, Artifacts};
use plugc::helpers::base_path;
use plugc::Code;

/// Compile the schema given on the command line, in the environment, or the built-in one
fn load_artifacts(schema: Option<PathBuf>) -> Result<Artifacts> {
    let schema = schema.or_else(|| base_path::SCHEMA_FILE.clone());
    Ok(compile::load_and_compile(schema.as_deref())?)
}

/// Accept an enumeration name as well as a numeric code
fn resolve_code(artifacts: &Artifacts, arg: &str) -> Result<Code> {
    if let Some(code) = artifacts.lookup(arg) {
        return Ok(code);
    }
    arg.parse::<Code>()
        .map_err(|e| anyhow!("'{arg}' is neither a plug type name nor a code: {e}"))
}
