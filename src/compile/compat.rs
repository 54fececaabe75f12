//! Producer/consumer compatibility
//!
//! A fixed sequence of wiring rules is checked first; the first one that
//! applies decides. Whatever is left is settled by descending the destination's
//! branch of the taxonomy, where a COMPATIBLE node accepts any source inside
//! its subtree.
use std::fmt;

use plugcode::Code;
use serde::Serialize;

use super::decision::{switch_on, Decision, Operand, Operands, Rhs, Symbol};
use crate::codes::{AllocatedLevel, AllocatedNode, CodeTable};
use crate::schema::TypeFlags;

/// Root categories whose values behave like switches
pub const SWITCH_CATEGORIES: [&str; 2] = ["BINARY", "TERNARY"];

/// Root category of relative step values
pub const ENCODER_CATEGORY: &str = "ENCODER";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Direction,
    ExactMatch,
    SwitchEquivalence,
    SwitchDrivesCommand,
    ValueDrivesSwitch,
    EncoderDrivesCommand,
    CommandAsymmetry,
    StructuralDescent,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rule::Direction => "output must connect to input",
            Rule::ExactMatch => "source lies in destination category",
            Rule::SwitchEquivalence => "switches interchange",
            Rule::SwitchDrivesCommand => "switch drives command",
            Rule::ValueDrivesSwitch => "value drives switch",
            Rule::EncoderDrivesCommand => "encoder drives command",
            Rule::CommandAsymmetry => "command cannot drive a value",
            Rule::StructuralDescent => "type hierarchy",
        };
        f.write_str(text)
    }
}

/// Outcome of a compatibility check together with the rule that decided it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub compatible: bool,
    pub rule: Rule,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompatibilityProcedure {
    /// Mask of the root level
    pub category: Symbol,
    pub switch_categories: Vec<Symbol>,
    pub encoder_category: Option<Symbol>,
    /// Structural descent over the destination's branch
    pub descent: Decision<bool>,
}

pub fn compile_compatibility(table: &CodeTable) -> CompatibilityProcedure {
    let switch_categories: Vec<Symbol> = SWITCH_CATEGORIES
        .iter()
        .filter_map(|name| table.root_category(name))
        .map(AllocatedNode::symbol)
        .collect();
    if switch_categories.len() < SWITCH_CATEGORIES.len() {
        log::warn!(
            "Schema lacks some of the switch categories {:?}, switch rules apply to {} of them",
            SWITCH_CATEGORIES,
            switch_categories.len()
        );
    }
    let encoder_category = table.root_category(ENCODER_CATEGORY).map(AllocatedNode::symbol);
    if encoder_category.is_none() {
        log::warn!("Schema has no {ENCODER_CATEGORY} category, encoder rule disabled");
    }

    CompatibilityProcedure {
        category: table.root.mask_symbol(),
        switch_categories,
        encoder_category,
        descent: descent_level(&table.root, false),
    }
}

/// Switch on the destination at this level. Nested levels first accept any
/// source that lies below the destination itself.
fn descent_level(level: &AllocatedLevel, nested: bool) -> Decision<bool> {
    let switch = switch_on(level, Operand::Dst, Decision::ret(false), |node| {
        Some(match &node.children {
            Some(children) if !node.flags.contains(TypeFlags::COMPATIBLE) => {
                descent_level(children, true)
            }
            _ => Decision::IfMatch {
                operand: Operand::Src,
                mask: level.mask_symbol(),
                rhs: Rhs::Symbol(node.symbol()),
                then: true,
                otherwise: Box::new(Decision::ret(false)),
            },
        })
    });
    if !nested {
        return switch;
    }
    Decision::IfMatch {
        operand: Operand::Src,
        mask: level.mask_symbol(),
        rhs: Rhs::Operand(Operand::Dst),
        then: true,
        otherwise: Box::new(switch),
    }
}

impl CompatibilityProcedure {
    fn is_switch(&self, category: Code) -> bool {
        self.switch_categories.iter().any(|s| s.code == category)
    }

    fn is_encoder(&self, category: Code) -> bool {
        self.encoder_category
            .as_ref()
            .is_some_and(|s| s.code == category)
    }

    /// Whether a consumer of type `dst` may be wired to a producer of type `src`
    pub fn is_compatible(&self, dst: Code, src: Code) -> bool {
        self.check(dst, src).compatible
    }

    pub fn check(&self, dst: Code, src: Code) -> Verdict {
        let verdict = |compatible, rule| Verdict { compatible, rule };

        if !src.is_output() || !dst.is_input() {
            return verdict(false, Rule::Direction);
        }
        let src_command = src.is_command();
        let dst_command = dst.is_command();
        let (src, dst) = (src.type_code(), dst.type_code());

        let src_category = src.masked(self.category.code);
        let dst_category = dst.masked(self.category.code);
        if src_category == dst {
            return verdict(true, Rule::ExactMatch);
        }

        let src_switch = self.is_switch(src_category);
        let dst_switch = self.is_switch(dst_category);
        if src_switch && dst_switch {
            return verdict(true, Rule::SwitchEquivalence);
        }
        if src_switch && dst_command {
            return verdict(true, Rule::SwitchDrivesCommand);
        }
        if !src_command && dst_switch {
            return verdict(true, Rule::ValueDrivesSwitch);
        }
        if self.is_encoder(src_category) && dst_command && !dst_switch {
            return verdict(true, Rule::EncoderDrivesCommand);
        }
        if src_command && !dst_command {
            return verdict(false, Rule::CommandAsymmetry);
        }

        let compatible = *self.descent.evaluate(&Operands::pair(dst, src));
        verdict(compatible, Rule::StructuralDescent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::allocate;
    use crate::schema;
    use plugcode::Direction;

    struct Fixture {
        table: CodeTable,
        procedure: CompatibilityProcedure,
    }

    impl Fixture {
        fn new() -> Self {
            let table = allocate(&schema::reference().unwrap()).unwrap();
            let procedure = compile_compatibility(&table);
            Fixture { table, procedure }
        }

        fn code(&self, path: &str, command: bool, direction: Direction) -> Code {
            let code = self.table.find(path).unwrap().code.with_direction(direction);
            if command {
                code.with_command()
            } else {
                code
            }
        }

        fn dst(&self, path: &str) -> Code {
            self.code(path, false, Direction::In)
        }

        fn dst_cmd(&self, path: &str) -> Code {
            self.code(path, true, Direction::In)
        }

        fn src(&self, path: &str) -> Code {
            self.code(path, false, Direction::Out)
        }

        fn src_cmd(&self, path: &str) -> Code {
            self.code(path, true, Direction::Out)
        }
    }

    #[test]
    fn direction_is_required() {
        let f = Fixture::new();
        let light = f.table.find("BINARY.POWER.LIGHT").unwrap().code;
        let verdict = f.procedure.check(light, light);
        assert_eq!(
            verdict,
            Verdict {
                compatible: false,
                rule: Rule::Direction
            }
        );
        assert!(!f.procedure.is_compatible(f.src("BINARY.POWER.LIGHT"), f.dst("BINARY.POWER.LIGHT")));
        assert!(f.procedure.is_compatible(f.dst("BINARY.POWER.LIGHT"), f.src("BINARY.POWER.LIGHT")));
    }

    #[test]
    fn category_destination_accepts_any_member() {
        let f = Fixture::new();
        let verdict = f
            .procedure
            .check(f.dst("METERING"), f.src("METERING.ELECTRIC.SUPPLY.PEAK"));
        assert_eq!(verdict.rule, Rule::ExactMatch);
        assert!(verdict.compatible);
        assert!(!f
            .procedure
            .is_compatible(f.dst("METERING.ELECTRIC.SUPPLY.PEAK"), f.src("METERING")));
    }

    #[test]
    fn switch_rules() {
        let f = Fixture::new();
        let p = &f.procedure;
        assert_eq!(
            p.check(f.dst("BINARY.SWITCH"), f.src("TERNARY.SWITCH")).rule,
            Rule::SwitchEquivalence
        );
        assert_eq!(
            p.check(f.dst_cmd("PHYSICAL.TEMPERATURE.SETPOINT"), f.src("BINARY.BUTTON.WALL")),
            Verdict {
                compatible: true,
                rule: Rule::SwitchDrivesCommand
            }
        );
        assert_eq!(
            p.check(f.dst("BINARY.SWITCH"), f.src("PHYSICAL.TEMPERATURE.MEASURED")),
            Verdict {
                compatible: true,
                rule: Rule::ValueDrivesSwitch
            }
        );
        assert!(!p.is_compatible(
            f.dst("BINARY.SWITCH"),
            f.src_cmd("PHYSICAL.TEMPERATURE.SETPOINT")
        ));
    }

    #[test]
    fn encoder_drives_non_switch_commands_only() {
        let f = Fixture::new();
        let p = &f.procedure;
        assert_eq!(
            p.check(f.dst_cmd("LIGHTING.BRIGHTNESS"), f.src("ENCODER.ROTARY")).rule,
            Rule::EncoderDrivesCommand
        );
        assert!(!p.is_compatible(f.dst("LIGHTING.BRIGHTNESS"), f.src("ENCODER.ROTARY")));
    }

    #[test]
    fn commands_never_drive_values() {
        let f = Fixture::new();
        assert_eq!(
            f.procedure.check(
                f.dst("PHYSICAL.TEMPERATURE.MEASURED"),
                f.src_cmd("BINARY.POWER.LIGHT")
            ),
            Verdict {
                compatible: false,
                rule: Rule::CommandAsymmetry
            }
        );
        assert!(!f
            .procedure
            .is_compatible(f.dst("LIGHTING.BRIGHTNESS"), f.src_cmd("LIGHTING.BRIGHTNESS")));
        assert!(f
            .procedure
            .is_compatible(f.dst_cmd("LIGHTING.BRIGHTNESS"), f.src("LIGHTING.BRIGHTNESS")));
    }

    #[test]
    fn compatible_nodes_collapse_their_subtree() {
        let f = Fixture::new();
        let p = &f.procedure;
        let verdict = p.check(
            f.dst("PHYSICAL.TEMPERATURE.MEASURED.ROOM"),
            f.src("PHYSICAL.TEMPERATURE.MEASURED.OUTDOOR"),
        );
        assert_eq!(
            verdict,
            Verdict {
                compatible: true,
                rule: Rule::StructuralDescent
            }
        );
        assert!(!p.is_compatible(
            f.dst("PHYSICAL.TEMPERATURE.SETPOINT"),
            f.src("PHYSICAL.TEMPERATURE.MEASURED.ROOM")
        ));
        // VOLTAGE.MEASURED is not COMPATIBLE, its leaves stay distinct
        assert!(!p.is_compatible(
            f.dst("PHYSICAL.VOLTAGE.MEASURED.LOW"),
            f.src("PHYSICAL.VOLTAGE.MEASURED.MAINS")
        ));
        assert!(p.is_compatible(
            f.dst("PHYSICAL.VOLTAGE.MEASURED"),
            f.src("PHYSICAL.VOLTAGE.MEASURED.MAINS")
        ));
    }

    #[test]
    fn missing_special_categories_disable_their_rules() {
        let schema = schema::from_str(
            r#"{"type_bits": 8, "bit_count": 2, "types": [
                {"name": "A", "label": "A", "children": {"bit_count": 2, "types": [
                    {"name": "X", "label": "X"}, {"name": "Y", "label": "Y"}
                ]}}
            ]}"#,
        )
        .unwrap();
        let procedure = compile_compatibility(&allocate(&schema).unwrap());
        assert!(procedure.switch_categories.is_empty());
        assert!(procedure.encoder_category.is_none());

        let x = Code::new(0b01_01_0000);
        let y = Code::new(0b01_10_0000);
        let io = |c: Code, d| c.with_direction(d);
        assert!(procedure.is_compatible(io(x, Direction::In), io(x, Direction::Out)));
        assert!(!procedure.is_compatible(io(x, Direction::In), io(y, Direction::Out)));
    }
}
