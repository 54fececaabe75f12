use plugcode::Code;
use serde::Serialize;

use crate::codes::{AllocatedLevel, CodeTable, FLAG_CONSTANTS};

/// One named constant of the packed plug type enumeration
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub name: String,
    pub code: Code,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Nesting depth, 0 for flags and root level entries
    pub depth: usize,
}

impl Constant {
    fn new(name: impl Into<String>, code: Code, depth: usize) -> Self {
        Constant {
            name: name.into(),
            code,
            comment: None,
            depth,
        }
    }

    fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}

/// Flag constants followed by every level mask and node variant in pre-order
pub fn enumerate(table: &CodeTable) -> Vec<Constant> {
    let mut constants: Vec<Constant> = FLAG_CONSTANTS
        .iter()
        .map(|&(name, code)| {
            let constant = Constant::new(name, code, 0);
            match flag_comment(name) {
                Some(comment) => constant.with_comment(comment),
                None => constant,
            }
        })
        .collect();
    enumerate_level(&table.root, 0, &mut constants);
    constants
}

fn flag_comment(name: &str) -> Option<&'static str> {
    match name {
        "IN" => Some("direction"),
        "CMD" => Some("explicit command (set, step, toggle)"),
        "TYPE_MASK" => Some("type"),
        _ => None,
    }
}

fn enumerate_level(level: &AllocatedLevel, depth: usize, constants: &mut Vec<Constant>) {
    constants.push(Constant::new(level.mask_name(), level.mask, depth));
    for node in &level.nodes {
        for (i, variant) in node.variants().into_iter().enumerate() {
            let constant = Constant::new(variant.name, variant.code, depth);
            constants.push(if i == 0 && !node.description.is_empty() {
                constant.with_comment(&node.description)
            } else {
                constant
            });
        }
        if let Some(children) = &node.children {
            enumerate_level(children, depth + 1, constants);
        }
    }
}
