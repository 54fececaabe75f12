use super::decision::{switch_on, Decision, Operand};
use crate::codes::{AllocatedLevel, CodeTable};

/// Longest-match label lookup
///
/// Codes below a node that match none of its children fall back to that
/// node's label; codes outside every root category have no label.
pub fn compile_labels(table: &CodeTable) -> Decision<Option<String>> {
    label_level(&table.root, None)
}

fn label_level(level: &AllocatedLevel, fallback: Option<String>) -> Decision<Option<String>> {
    switch_on(level, Operand::Type, Decision::ret(fallback), |node| {
        Some(match &node.children {
            None => Decision::ret(Some(node.label.clone())),
            Some(children) => label_level(children, Some(node.label.clone())),
        })
    })
}
