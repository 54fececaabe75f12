//! Hierarchical bit allocation
//!
//! The root level takes the topmost `bit_count` bits of the type field, every
//! nested level the bits right below its parent's slot. Selector value 0 is kept
//! free on every level so that a code ending in zeros names the category itself.
use std::collections::HashSet;

use itertools::Itertools;
use plugcode::Code;
use thiserror::Error;

use super::table::{AllocatedLevel, AllocatedNode, CodeTable, FLAG_CONSTANTS};
use crate::schema::{Level, Schema};

const ROOT_PATH: &str = "<root>";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AllocateError {
    #[error("not enough bits for {path}: level needs {needed} bits but only {remaining} remain")]
    InsufficientBits {
        path: String,
        needed: u32,
        remaining: u32,
    },
    #[error("overflow of {path}: {count} types declared but {bit_count} bits address at most {capacity}")]
    CategoryOverflow {
        path: String,
        count: usize,
        bit_count: u32,
        capacity: u32,
    },
    #[error("{path} declares an empty list of types")]
    EmptyCategory { path: String },
    #[error("{path} declares '{name}' more than once")]
    DuplicateName { path: String, name: String },
    #[error("{path} declares '{name}', which is not an identifier of the form [A-Z_][A-Z0-9_]*")]
    InvalidName { path: String, name: String },
    #[error("{path} produces the constant {name}, which is already defined")]
    DuplicateConstant { name: String, path: String },
    #[error("{type_bits} type bits leave no room for the flag bits (at most {max} allowed)")]
    TypeBitsTooWide { type_bits: u32, max: u32 },
}

/// Assign codes and category masks to every node of the schema
///
/// This is the single validation pass; the first violation aborts allocation.
pub fn allocate(schema: &Schema) -> Result<CodeTable, AllocateError> {
    if schema.type_bits > plugcode::TYPE_BITS {
        return Err(AllocateError::TypeBitsTooWide {
            type_bits: schema.type_bits,
            max: plugcode::TYPE_BITS,
        });
    }

    let root = allocate_level(
        &schema.root,
        &Parent {
            path: ROOT_PATH,
            prefix: "",
            code: Code::UNKNOWN,
        },
        schema.type_bits,
        schema.type_bits,
    )?;

    let table = CodeTable {
        type_bits: schema.type_bits,
        root,
    };
    check_constant_names(&table)?;
    log::debug!(
        "Allocated {} types using {} of {} type bits",
        table.nodes().len(),
        table.used_bits(),
        table.type_bits
    );
    Ok(table)
}

struct Parent<'a> {
    path: &'a str,
    prefix: &'a str,
    code: Code,
}

fn allocate_level(
    level: &Level,
    parent: &Parent,
    type_bits: u32,
    remaining: u32,
) -> Result<AllocatedLevel, AllocateError> {
    if level.bit_count > remaining {
        return Err(AllocateError::InsufficientBits {
            path: parent.path.to_string(),
            needed: level.bit_count,
            remaining,
        });
    }
    if level.types.is_empty() {
        return Err(AllocateError::EmptyCategory {
            path: parent.path.to_string(),
        });
    }
    let capacity = (1u32 << level.bit_count) - 1;
    if level.types.len() > capacity as usize {
        return Err(AllocateError::CategoryOverflow {
            path: parent.path.to_string(),
            count: level.types.len(),
            bit_count: level.bit_count,
            capacity,
        });
    }
    if let Some(name) = level
        .types
        .iter()
        .flat_map(|t| std::iter::once(&t.name).chain(t.usage.as_ref()))
        .find(|name| !is_identifier(name))
    {
        return Err(AllocateError::InvalidName {
            path: parent.path.to_string(),
            name: name.clone(),
        });
    }
    if let Some(name) = level.types.iter().map(|t| &t.name).duplicates().next() {
        return Err(AllocateError::DuplicateName {
            path: parent.path.to_string(),
            name: name.clone(),
        });
    }

    let offset = remaining - level.bit_count;
    let mask = Code::category_mask(offset, type_bits);
    log::trace!(
        "Level {}: {} types in bits {}..{}",
        parent.path,
        level.types.len(),
        offset,
        remaining
    );

    let nodes = level
        .types
        .iter()
        .zip(1u16..)
        .map(|(node, index)| -> Result<AllocatedNode, AllocateError> {
            let qualified_name = format!("{}{}", parent.prefix, node.name);
            let path = if parent.path == ROOT_PATH {
                node.name.clone()
            } else {
                format!("{}.{}", parent.path, node.name)
            };
            let code = parent.code | Code::new(index << offset);
            let children = match &node.children {
                Some(children) => Some(allocate_level(
                    children,
                    &Parent {
                        path: &path,
                        prefix: &format!("{qualified_name}_"),
                        code,
                    },
                    type_bits,
                    offset,
                )?),
                None => None,
            };
            Ok(AllocatedNode {
                name: node.name.clone(),
                qualified_name,
                path,
                index,
                code,
                category_mask: mask,
                flags: node.flags,
                label: node.label.clone(),
                usage: node.usage.clone(),
                description: node.description.clone(),
                children,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllocatedLevel {
        prefix: parent.prefix.to_string(),
        offset,
        bit_count: level.bit_count,
        mask,
        nodes,
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('A'..='Z' | '_'))
        && chars.all(|c| matches!(c, 'A'..='Z' | '0'..='9' | '_'))
}

/// Names are joined with `_` across levels, so uniqueness among siblings does
/// not make the enumeration unique. Walk it in output order and reject the
/// first name that is taken already.
fn check_constant_names(table: &CodeTable) -> Result<(), AllocateError> {
    let mut taken: HashSet<String> = FLAG_CONSTANTS
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    check_level_names(&table.root, ROOT_PATH, &mut taken)
}

fn check_level_names(
    level: &AllocatedLevel,
    path: &str,
    taken: &mut HashSet<String>,
) -> Result<(), AllocateError> {
    claim(level.mask_name(), path, taken)?;
    for node in &level.nodes {
        for variant in node.variants() {
            claim(variant.name, &node.path, taken)?;
        }
        if let Some(children) = &node.children {
            check_level_names(children, &node.path, taken)?;
        }
    }
    Ok(())
}

fn claim(name: String, path: &str, taken: &mut HashSet<String>) -> Result<(), AllocateError> {
    if taken.contains(&name) {
        return Err(AllocateError::DuplicateConstant {
            name,
            path: path.to_string(),
        });
    }
    taken.insert(name);
    Ok(())
}
