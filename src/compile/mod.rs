//! Compilation of a schema into the collected artifact
//!
//! Allocation has to succeed before any decision table is built; after that
//! every step is a pure function of the code table.
use std::collections::BTreeSet;
use std::path::Path;

use plugcode::Code;
use serde::Serialize;
use thiserror::Error;

use crate::codes::{allocate, AllocateError, CodeTable};
use crate::schema::{self, Schema, SchemaError};

mod compat;
mod decision;
mod enumeration;
mod label;
mod usage;

pub use compat::{
    compile_compatibility, CompatibilityProcedure, Rule, Verdict, ENCODER_CATEGORY,
    SWITCH_CATEGORIES,
};
pub use decision::{switch_on, Arm, Decision, Operand, Operands, Rhs, Symbol};
pub use enumeration::{enumerate, Constant};
pub use label::compile_labels;
pub use usage::{collect_usages, compile_usage, UsageTag, NO_USAGE};

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Allocate(#[from] AllocateError),
}

/// Everything generated from one schema
#[derive(Clone, Debug, Serialize)]
pub struct Artifacts {
    pub type_bits: u32,
    /// Number of taxonomy nodes
    pub type_count: usize,
    /// Bits of the type field taken by the deepest path
    pub used_bits: u32,
    pub enumeration: Vec<Constant>,
    pub usages: BTreeSet<String>,
    pub labels: Decision<Option<String>>,
    pub usage: Decision<UsageTag>,
    pub compatibility: CompatibilityProcedure,
}

pub fn compile(schema: &Schema) -> Result<Artifacts, AllocateError> {
    let table = allocate(schema)?;
    Ok(compile_table(&table))
}

/// Load a schema (or the reference schema) and compile it
pub fn load_and_compile(path: Option<&Path>) -> Result<Artifacts, CompileError> {
    let schema = schema::load(path)?;
    Ok(compile(&schema)?)
}

pub fn compile_table(table: &CodeTable) -> Artifacts {
    let usage = compile_usage(table);
    let artifacts = Artifacts {
        type_bits: table.type_bits,
        type_count: table.nodes().len(),
        used_bits: table.used_bits(),
        enumeration: enumerate(table),
        usages: collect_usages(table, &usage),
        labels: compile_labels(table),
        usage,
        compatibility: compile_compatibility(table),
    };
    log::debug!(
        "Compiled {} constants and {} usages",
        artifacts.enumeration.len(),
        artifacts.usages.len()
    );
    artifacts
}

impl Artifacts {
    /// Label of the most specific type matching `code`
    pub fn label(&self, code: Code) -> Option<&str> {
        self.labels.evaluate(&Operands::of_type(code)).as_deref()
    }

    pub fn usage(&self, code: Code, is_command: bool) -> String {
        self.usage
            .evaluate(&Operands::of_type(code))
            .resolve(is_command)
    }

    pub fn is_compatible(&self, dst: Code, src: Code) -> bool {
        self.compatibility.is_compatible(dst, src)
    }

    pub fn check_compatibility(&self, dst: Code, src: Code) -> Verdict {
        self.compatibility.check(dst, src)
    }

    /// Code of an enumeration constant, e.g. `BINARY_POWER_LIGHT_CMD_OUT`
    pub fn lookup(&self, name: &str) -> Option<Code> {
        self.enumeration
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_evaluate() {
        let artifacts = load_and_compile(None).unwrap();
        let light = artifacts.lookup("BINARY_POWER_LIGHT_CMD_OUT").unwrap();
        assert_eq!(artifacts.label(light), Some("Light Power"));
        assert_eq!(artifacts.usage(light, light.is_command()), "OFF_ON_TOGGLE");
        assert!(artifacts.lookup("NO_SUCH_TYPE").is_none());
    }

    #[test]
    fn compile_is_deterministic() {
        let schema = schema::reference().unwrap();
        let first = serde_json::to_string(&compile(&schema).unwrap()).unwrap();
        let second = serde_json::to_string(&compile(&schema).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_schema_file_is_a_schema_error() {
        let err = load_and_compile(Some(Path::new("/nonexistent/plug_types.json"))).unwrap_err();
        assert!(matches!(err, CompileError::Schema(_)));
    }
}
