//! Plug type taxonomy as authored in schema files
//!
//! A schema is a tree of [`TypeNode`]s. Every node that has children owns a
//! [`Level`] which declares how many bits its selector occupies in the packed
//! code. The tree is read once and never mutated afterwards.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod flags;

pub use flags::TypeFlags;

/// Latest snapshot of the RoomControl plug type taxonomy
pub const REFERENCE_SCHEMA: &str = include_str!("../../resources/schema/plug_types.json");

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("could not read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse schema JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Schema {
    /// Width of the type field the levels are packed into
    pub type_bits: u32,
    #[serde(flatten)]
    pub root: Level,
}

/// Ordered list of sibling types sharing one selector slot
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Level {
    pub bit_count: u32,
    pub types: Vec<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypeNode {
    pub name: String,
    #[serde(default)]
    pub flags: TypeFlags,
    pub label: String,
    /// Absent means the usage of the nearest ancestor applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Level>,
}

impl Schema {
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl Level {
    pub fn node_count(&self) -> usize {
        self.types
            .iter()
            .map(|node| 1 + node.children.as_ref().map_or(0, Level::node_count))
            .sum()
    }
}

impl TypeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

pub fn from_str(schema_raw: &str) -> Result<Schema, SchemaError> {
    serde_json::from_str::<Schema>(schema_raw).map_err(Into::into)
}

pub fn from_path(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    log::debug!("Loading schema from {}", path.display());
    let schema_raw = fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&schema_raw)
}

pub fn reference() -> Result<Schema, SchemaError> {
    from_str(REFERENCE_SCHEMA)
}

/// Load the schema at `path`, or the built-in reference schema if none is given
pub fn load(path: Option<&Path>) -> Result<Schema, SchemaError> {
    match path {
        Some(path) => from_path(path),
        None => {
            log::debug!("Using built-in reference schema");
            reference()
        }
    }
}
