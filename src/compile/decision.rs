//! Structured decision tables
//!
//! Every compiler folds the code table into a [`Decision`] tree made of masked
//! switches and masked comparisons. The tree is the single source of truth:
//! renderers serialize it and [`Decision::evaluate`] interprets it in-process.
use plugcode::Code;
use serde::Serialize;

use crate::codes::{AllocatedLevel, AllocatedNode};

/// A code together with the enumeration name it is rendered as
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub code: Code,
}

/// Input a decision inspects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// Type bits of the code being classified
    Type,
    /// Type bits of the consuming endpoint
    Dst,
    /// Type bits of the producing endpoint
    Src,
}

/// Right-hand side of a masked comparison
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rhs {
    Symbol(Symbol),
    Operand(Operand),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision<T> {
    Return {
        value: T,
    },
    /// Branch on `operand & mask`
    Switch {
        operand: Operand,
        mask: Symbol,
        arms: Vec<Arm<T>>,
        default: Box<Decision<T>>,
    },
    /// Yield `then` if `operand & mask == rhs`, continue with `otherwise` if not
    IfMatch {
        operand: Operand,
        mask: Symbol,
        rhs: Rhs,
        then: T,
        otherwise: Box<Decision<T>>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Arm<T> {
    pub case: Symbol,
    pub then: Decision<T>,
}

/// Concrete operand values for one evaluation
#[derive(Clone, Copy, Debug, Default)]
pub struct Operands {
    pub ty: Code,
    pub dst: Code,
    pub src: Code,
}

impl Operands {
    pub fn of_type(code: Code) -> Self {
        Operands {
            ty: code.type_code(),
            ..Default::default()
        }
    }

    pub fn pair(dst: Code, src: Code) -> Self {
        Operands {
            dst: dst.type_code(),
            src: src.type_code(),
            ..Default::default()
        }
    }

    fn get(&self, operand: Operand) -> Code {
        match operand {
            Operand::Type => self.ty,
            Operand::Dst => self.dst,
            Operand::Src => self.src,
        }
    }
}

impl<T> Decision<T> {
    pub fn ret(value: T) -> Self {
        Decision::Return { value }
    }

    pub fn evaluate(&self, operands: &Operands) -> &T {
        let mut decision = self;
        loop {
            match decision {
                Decision::Return { value } => return value,
                Decision::Switch {
                    operand,
                    mask,
                    arms,
                    default,
                } => {
                    let selector = operands.get(*operand).masked(mask.code);
                    decision = arms
                        .iter()
                        .find(|arm| arm.case.code == selector)
                        .map_or(default.as_ref(), |arm| &arm.then);
                }
                Decision::IfMatch {
                    operand,
                    mask,
                    rhs,
                    then,
                    otherwise,
                } => {
                    let rhs = match rhs {
                        Rhs::Symbol(symbol) => symbol.code,
                        Rhs::Operand(other) => operands.get(*other),
                    };
                    if operands.get(*operand).masked(mask.code) == rhs {
                        return then;
                    }
                    decision = otherwise.as_ref();
                }
            }
        }
    }

    /// Every value the decision can yield, in tree order
    pub fn values(&self) -> Vec<&T> {
        let mut values = Vec::new();
        self.collect_values(&mut values);
        values
    }

    fn collect_values<'a>(&'a self, values: &mut Vec<&'a T>) {
        match self {
            Decision::Return { value } => values.push(value),
            Decision::Switch { arms, default, .. } => {
                for arm in arms {
                    arm.then.collect_values(values);
                }
                default.collect_values(values);
            }
            Decision::IfMatch {
                then, otherwise, ..
            } => {
                values.push(then);
                otherwise.collect_values(values);
            }
        }
    }
}

impl AllocatedLevel {
    pub fn mask_symbol(&self) -> Symbol {
        Symbol {
            name: self.mask_name(),
            code: self.mask,
        }
    }
}

impl AllocatedNode {
    pub fn symbol(&self) -> Symbol {
        Symbol {
            name: self.qualified_name.clone(),
            code: self.code,
        }
    }
}

/// Fold one level into a switch on `operand & level mask`
///
/// `arm` decides the sub-decision for each node; returning `None` leaves the
/// node to the default branch.
pub fn switch_on<T, F>(
    level: &AllocatedLevel,
    operand: Operand,
    default: Decision<T>,
    mut arm: F,
) -> Decision<T>
where
    F: FnMut(&AllocatedNode) -> Option<Decision<T>>,
{
    let arms = level
        .nodes
        .iter()
        .filter_map(|node| {
            arm(node).map(|then| Arm {
                case: node.symbol(),
                then,
            })
        })
        .collect();
    Decision::Switch {
        operand,
        mask: level.mask_symbol(),
        arms,
        default: Box::new(default),
    }
}
