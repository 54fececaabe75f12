//! Default usage classification
//!
//! The usage of a code is the `usage` of the nearest node on its path that
//! declares one. Nodes flagged TOGGLE additionally offer `<usage>_TOGGLE`,
//! which is what a command on that type resolves to.
use std::collections::BTreeSet;

use serde::Serialize;

use super::decision::{switch_on, Decision, Operand};
use crate::codes::{AllocatedLevel, AllocatedNode, CodeTable};
use crate::schema::TypeFlags;

/// Usage tag reported for codes without any declared usage
pub const NO_USAGE: &str = "NONE";

const TOGGLE_SUFFIX: &str = "_TOGGLE";

/// Effective usage of a subtree before the command flag is taken into account
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UsageTag {
    pub tag: String,
    pub toggle: bool,
}

impl UsageTag {
    fn none() -> Self {
        UsageTag {
            tag: NO_USAGE.to_string(),
            toggle: false,
        }
    }

    pub fn toggle_tag(&self) -> String {
        format!("{}{}", self.tag, TOGGLE_SUFFIX)
    }

    pub fn resolve(&self, is_command: bool) -> String {
        if self.toggle && is_command {
            self.toggle_tag()
        } else {
            self.tag.clone()
        }
    }
}

/// State carried down the tree
#[derive(Clone, Debug, Default)]
struct Inherited {
    usage: Option<String>,
    toggle: bool,
}

impl Inherited {
    fn enter(&self, node: &AllocatedNode) -> Inherited {
        let own_toggle = node.flags.contains(TypeFlags::TOGGLE);
        match &node.usage {
            Some(usage) => Inherited {
                usage: Some(usage.clone()),
                toggle: own_toggle,
            },
            None => Inherited {
                usage: self.usage.clone(),
                toggle: self.toggle || own_toggle,
            },
        }
    }

    fn tag(&self) -> UsageTag {
        match &self.usage {
            Some(usage) => UsageTag {
                tag: usage.clone(),
                toggle: self.toggle,
            },
            None => UsageTag::none(),
        }
    }
}

pub fn compile_usage(table: &CodeTable) -> Decision<UsageTag> {
    usage_level(&table.root, &Inherited::default())
}

fn usage_level(level: &AllocatedLevel, inherited: &Inherited) -> Decision<UsageTag> {
    let default = Decision::ret(inherited.tag());
    let decision = switch_on(level, Operand::Type, default.clone(), |node| {
        let effective = inherited.enter(node);
        let then = match &node.children {
            Some(children) => usage_level(children, &effective),
            None => Decision::ret(effective.tag()),
        };
        (then != default).then_some(then)
    });
    // a level where nothing differs from the inherited usage needs no switch
    match decision {
        Decision::Switch { arms, default, .. } if arms.is_empty() => *default,
        decision => decision,
    }
}

/// Every usage tag the generated enumeration has to declare
pub fn collect_usages(table: &CodeTable, usage: &Decision<UsageTag>) -> BTreeSet<String> {
    let mut usages = BTreeSet::from([NO_USAGE.to_string()]);
    usages.extend(table.nodes().into_iter().filter_map(|n| n.usage.clone()));
    for tag in usage.values() {
        usages.insert(tag.resolve(false));
        usages.insert(tag.resolve(true));
    }
    usages
}
