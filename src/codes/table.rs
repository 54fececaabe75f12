use plugcode::{Code, Direction};
use serde::Serialize;

use crate::schema::TypeFlags;

/// Constants that precede the taxonomy in the enumeration
pub const FLAG_CONSTANTS: [(&str, Code); 6] = [
    ("IN", Code::IN),
    ("OUT", Code::OUT),
    ("DIRECTION_MASK", Code::DIRECTION_MASK),
    ("CMD", Code::CMD),
    ("TYPE_MASK", Code::TYPE_MASK),
    ("UNKNOWN", Code::UNKNOWN),
];

/// Result of bit allocation: the schema tree with every code and mask resolved
#[derive(Clone, Debug, Serialize)]
pub struct CodeTable {
    pub type_bits: u32,
    pub root: AllocatedLevel,
}

#[derive(Clone, Debug, Serialize)]
pub struct AllocatedLevel {
    /// Name prefix shared by the nodes of this level, e.g. `BINARY_POWER_`
    pub prefix: String,
    /// Bit position of this level's selector
    pub offset: u32,
    pub bit_count: u32,
    /// Category mask of this level
    pub mask: Code,
    pub nodes: Vec<AllocatedNode>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AllocatedNode {
    pub name: String,
    /// Enumeration name, e.g. `BINARY_POWER_LIGHT`
    pub qualified_name: String,
    /// Dotted schema path, e.g. `BINARY.POWER.LIGHT`
    pub path: String,
    /// Selector value within the parent level, starting at 1
    pub index: u16,
    pub code: Code,
    /// Mask of the level this node lives on
    pub category_mask: Code,
    pub flags: TypeFlags,
    pub label: String,
    pub usage: Option<String>,
    pub description: String,
    pub children: Option<AllocatedLevel>,
}

/// One named, direction-qualified code of a node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub code: Code,
}

impl CodeTable {
    /// All nodes in pre-order
    pub fn nodes(&self) -> Vec<&AllocatedNode> {
        let mut nodes = Vec::new();
        self.root.collect_nodes(&mut nodes);
        nodes
    }

    /// Look up a node by its dotted path, e.g. `BINARY.POWER.LIGHT`
    pub fn find(&self, path: &str) -> Option<&AllocatedNode> {
        self.root.find(path)
    }

    pub fn root_category(&self, name: &str) -> Option<&AllocatedNode> {
        self.root.nodes.iter().find(|n| n.name == name)
    }

    /// Number of type bits consumed by the deepest path
    pub fn used_bits(&self) -> u32 {
        self.type_bits - self.root.min_offset()
    }
}

impl AllocatedLevel {
    pub fn mask_name(&self) -> String {
        format!("{}CATEGORY", self.prefix)
    }

    pub fn find(&self, path: &str) -> Option<&AllocatedNode> {
        let (name, rest) = match path.split_once('.') {
            Some((name, rest)) => (name, Some(rest)),
            None => (path, None),
        };
        let node = self.nodes.iter().find(|n| n.name == name)?;
        match rest {
            None => Some(node),
            Some(rest) => node.children.as_ref()?.find(rest),
        }
    }

    fn collect_nodes<'a>(&'a self, nodes: &mut Vec<&'a AllocatedNode>) {
        for node in &self.nodes {
            nodes.push(node);
            if let Some(children) = &node.children {
                children.collect_nodes(nodes);
            }
        }
    }

    fn min_offset(&self) -> u32 {
        self.nodes
            .iter()
            .filter_map(|n| n.children.as_ref())
            .map(AllocatedLevel::min_offset)
            .fold(self.offset, u32::min)
    }
}

impl AllocatedNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_command(&self) -> bool {
        self.flags.contains(TypeFlags::CMD)
    }

    /// Base code plus its `_IN`/`_OUT` and, for command types, `_CMD_IN`/`_CMD_OUT` variants
    pub fn variants(&self) -> Vec<Variant> {
        let name = &self.qualified_name;
        let mut variants = vec![
            Variant {
                name: name.clone(),
                code: self.code,
            },
            Variant {
                name: format!("{name}_IN"),
                code: self.code.with_direction(Direction::In),
            },
            Variant {
                name: format!("{name}_OUT"),
                code: self.code.with_direction(Direction::Out),
            },
        ];
        if self.is_command() {
            variants.push(Variant {
                name: format!("{name}_CMD_IN"),
                code: self.code.with_command().with_direction(Direction::In),
            });
            variants.push(Variant {
                name: format!("{name}_CMD_OUT"),
                code: self.code.with_command().with_direction(Direction::Out),
            });
        }
        variants
    }
}
