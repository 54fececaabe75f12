use std::fmt::{self, Write};

use super::{RenderError, RenderedFile, Renderer};
use crate::compile::{
    Artifacts, CompatibilityProcedure, Decision, Operand, Rhs, Rule, Symbol, UsageTag,
};

pub const PLUG_TYPE_HEADER: &str = "PlugType.generated.hpp";
pub const USAGE_HEADER: &str = "Usage.generated.hpp";
pub const FUNCTIONS_SOURCE: &str = "functions.generated.cpp";

const GENERATED_NOTICE: &str = "// generated by plugc, do not edit";
const ENUM: &str = "PlugType";

/// `Usage` is declared as `uint8_t`
const MAX_USAGES: usize = 256;

/// C++ headers and function bodies for the node firmware
pub struct CppRenderer;

impl Renderer for CppRenderer {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn render(&self, artifacts: &Artifacts) -> Result<Vec<RenderedFile>, RenderError> {
        Ok(vec![
            RenderedFile::new(PLUG_TYPE_HEADER, plug_type_header(artifacts)?),
            RenderedFile::new(USAGE_HEADER, usage_header(artifacts)?),
            RenderedFile::new(FUNCTIONS_SOURCE, functions(artifacts)?),
        ])
    }
}

fn tabs(depth: usize) -> String {
    "\t".repeat(depth)
}

fn plug_type_header(artifacts: &Artifacts) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, "{GENERATED_NOTICE}")?;
    writeln!(out, "#pragma once\n")?;
    writeln!(out, "#include <cstdint>")?;
    writeln!(out, "#include <enum.hpp>\n\n")?;
    writeln!(out, "enum class {ENUM} : uint16_t {{")?;
    for constant in &artifacts.enumeration {
        let indent = tabs(constant.depth + 1);
        if let Some(comment) = &constant.comment {
            writeln!(out, "{indent}// {comment}")?;
        }
        writeln!(out, "{indent}{} = {},", constant.name, constant.code)?;
    }
    writeln!(out, "}};")?;
    writeln!(out, "FLAGS_ENUM({ENUM})")?;
    Ok(out)
}

fn usage_header(artifacts: &Artifacts) -> Result<String, RenderError> {
    if artifacts.usages.len() > MAX_USAGES {
        return Err(RenderError::TooManyUsages {
            count: artifacts.usages.len(),
            max: MAX_USAGES,
        });
    }
    let mut out = String::new();
    writeln!(out, "{GENERATED_NOTICE}")?;
    writeln!(out, "#pragma once\n")?;
    writeln!(out, "#include <cstdint>\n\n")?;
    writeln!(out, "enum class Usage : uint8_t {{")?;
    for usage in &artifacts.usages {
        writeln!(out, "\t{usage},")?;
    }
    writeln!(out, "}};")?;
    Ok(out)
}

fn functions(artifacts: &Artifacts) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, "{GENERATED_NOTICE}\n")?;

    writeln!(out, "String getTypeLabel({ENUM} type) {{")?;
    writeln!(out, "\tauto t = type & {ENUM}::TYPE_MASK;\n")?;
    emit(&mut out, &artifacts.labels, 1, &|label: &Option<String>| match label {
        Some(label) => c_string(label),
        None => Ok("{}".to_string()),
    })?;
    writeln!(out, "}}\n")?;

    writeln!(out, "Usage getUsage({ENUM} type) {{")?;
    writeln!(out, "\tbool cmd = (type & {ENUM}::CMD) != 0;")?;
    writeln!(out, "\tauto t = type & {ENUM}::TYPE_MASK;\n")?;
    emit(&mut out, &artifacts.usage, 1, &usage_value)?;
    writeln!(out, "}}\n")?;

    writeln!(out, "bool isCompatible({ENUM} dstType, {ENUM} srcType) {{")?;
    compatibility_prelude(&mut out, &artifacts.compatibility)?;
    emit(&mut out, &artifacts.compatibility.descent, 1, &|value: &bool| -> Result<String, fmt::Error> {
        Ok(value.to_string())
    })?;
    writeln!(out, "}}")?;
    Ok(out)
}

fn usage_value(tag: &UsageTag) -> Result<String, fmt::Error> {
    Ok(if tag.toggle {
        format!("cmd ? Usage::{} : Usage::{}", tag.toggle_tag(), tag.tag)
    } else {
        format!("Usage::{}", tag.tag)
    })
}

fn operand(operand: Operand) -> &'static str {
    match operand {
        Operand::Type => "t",
        Operand::Dst => "dst",
        Operand::Src => "src",
    }
}

fn symbol(symbol: &Symbol) -> String {
    format!("{ENUM}::{}", symbol.name)
}

/// Print a decision table as nested switch statements
fn emit<T>(
    out: &mut String,
    decision: &Decision<T>,
    depth: usize,
    value: &dyn Fn(&T) -> Result<String, fmt::Error>,
) -> Result<(), RenderError> {
    let indent = tabs(depth);
    match decision {
        Decision::Return { value: v } => writeln!(out, "{indent}return {};", value(v)?)?,
        Decision::Switch {
            operand: op,
            mask,
            arms,
            default,
        } => {
            writeln!(out, "{indent}switch ({} & {}) {{", operand(*op), symbol(mask))?;
            for arm in arms {
                writeln!(out, "{indent}case {}:", symbol(&arm.case))?;
                emit(out, &arm.then, depth + 1, value)?;
            }
            writeln!(out, "{indent}default:")?;
            emit(out, default, depth + 1, value)?;
            writeln!(out, "{indent}}}")?;
        }
        Decision::IfMatch {
            operand: op,
            mask,
            rhs,
            then,
            otherwise,
        } => {
            let rhs = match rhs {
                Rhs::Symbol(s) => symbol(s),
                Rhs::Operand(other) => operand(*other).to_string(),
            };
            writeln!(
                out,
                "{indent}if (({} & {}) == {rhs}) return {};",
                operand(*op),
                symbol(mask),
                value(then)?
            )?;
            emit(out, otherwise, depth, value)?;
        }
    }
    Ok(())
}

/// Rule checks preceding the structural descent, in evaluation order
fn compatibility_prelude(
    out: &mut String,
    procedure: &CompatibilityProcedure,
) -> Result<(), RenderError> {
    let category = symbol(&procedure.category);
    let any_of = |operand: &str| -> String {
        if procedure.switch_categories.is_empty() {
            return "false".to_string();
        }
        procedure
            .switch_categories
            .iter()
            .map(|s| format!("{operand} == {}", symbol(s)))
            .collect::<Vec<_>>()
            .join(" || ")
    };

    writeln!(out, "\t// {}", Rule::Direction)?;
    writeln!(
        out,
        "\tif ((srcType & {ENUM}::DIRECTION_MASK) != {ENUM}::OUT || (dstType & {ENUM}::DIRECTION_MASK) != {ENUM}::IN)"
    )?;
    writeln!(out, "\t\treturn false;")?;
    writeln!(out, "\tbool srcCommand = (srcType & {ENUM}::CMD) != 0;")?;
    writeln!(out, "\tbool dstCommand = (dstType & {ENUM}::CMD) != 0;")?;
    writeln!(out, "\tauto src = srcType & {ENUM}::TYPE_MASK;")?;
    writeln!(out, "\tauto dst = dstType & {ENUM}::TYPE_MASK;")?;
    writeln!(out, "\tauto srcCategory = src & {category};")?;
    writeln!(out, "\tauto dstCategory = dst & {category};")?;
    writeln!(out, "\t// {}", Rule::ExactMatch)?;
    writeln!(out, "\tif (srcCategory == dst)\n\t\treturn true;")?;
    writeln!(out, "\tbool srcSwitch = {};", any_of("srcCategory"))?;
    writeln!(out, "\tbool dstSwitch = {};", any_of("dstCategory"))?;
    writeln!(out, "\t// {}", Rule::SwitchEquivalence)?;
    writeln!(out, "\tif (srcSwitch && dstSwitch)\n\t\treturn true;")?;
    writeln!(out, "\t// {}", Rule::SwitchDrivesCommand)?;
    writeln!(out, "\tif (srcSwitch && dstCommand)\n\t\treturn true;")?;
    writeln!(out, "\t// {}", Rule::ValueDrivesSwitch)?;
    writeln!(out, "\tif (!srcCommand && dstSwitch)\n\t\treturn true;")?;
    if let Some(encoder) = &procedure.encoder_category {
        writeln!(out, "\t// {}", Rule::EncoderDrivesCommand)?;
        writeln!(
            out,
            "\tif (srcCategory == {} && dstCommand && !dstSwitch)\n\t\treturn true;",
            symbol(encoder)
        )?;
    }
    writeln!(out, "\t// {}", Rule::CommandAsymmetry)?;
    writeln!(out, "\tif (srcCommand && !dstCommand)\n\t\treturn false;\n")?;
    Ok(())
}

/// Quote `s` as a C string literal
///
/// Control characters become fixed-width octal escapes, so a digit following
/// one is never read as part of the escape.
fn c_string(s: &str) -> Result<String, fmt::Error> {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_ascii_control() => write!(quoted, "\\{:03o}", c as u32)?,
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Ok(quoted)
}
