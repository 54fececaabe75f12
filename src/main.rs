mod argsets;
mod command;

use anyhow::{anyhow, Result};
use env_logger::Env;
use pico_args::Arguments;

use plugc::constants::{defaults, envvars};
use plugc::helpers;

const CMD_GENERATE: &str = "generate";
const CMD_CHECK: &str = "check";
const CMD_CODES: &str = "codes";
const CMD_LABEL: &str = "label";
const CMD_USAGE: &str = "usage";
const CMD_COMPATIBLE: &str = "compatible";

const ARG_SCHEMA: &str = "--schema";
const ARG_OUT: &str = "--out";
const ARG_FORMAT: &str = "--format";
const ARG_COMMAND: &str = "--command";

fn main() -> Result<()> {
    let dotenv_path = helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();
    if let Some(path) = dotenv_path {
        log::debug!("Loaded {}", path.display());
    }

    let mut args = Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_GENERATE) => {
            let generate_args = argsets::GenerateArgs {
                schema: args.opt_value_from_str(ARG_SCHEMA)?,
                out_dir: args.opt_value_from_str(ARG_OUT)?,
                format: args.opt_value_from_str(ARG_FORMAT)?,
            };
            finish(args)?;
            command::generate(generate_args)
        }
        Some(CMD_CHECK) => {
            let schema_args = schema_args(&mut args)?;
            finish(args)?;
            command::check(schema_args)
        }
        Some(CMD_CODES) => {
            let schema_args = schema_args(&mut args)?;
            finish(args)?;
            command::codes(schema_args)
        }
        Some(CMD_LABEL) => {
            let label_args = argsets::LabelArgs {
                schema: args.opt_value_from_str(ARG_SCHEMA)?,
                code: args.free_from_str()?,
            };
            finish(args)?;
            command::label(label_args)
        }
        Some(CMD_USAGE) => {
            let usage_args = argsets::UsageArgs {
                schema: args.opt_value_from_str(ARG_SCHEMA)?,
                command: args.contains(ARG_COMMAND),
                code: args.free_from_str()?,
            };
            finish(args)?;
            command::usage(usage_args)
        }
        Some(CMD_COMPATIBLE) => {
            let compatible_args = argsets::CompatibleArgs {
                schema: args.opt_value_from_str(ARG_SCHEMA)?,
                dst: args.free_from_str()?,
                src: args.free_from_str()?,
            };
            finish(args)?;
            command::compatible(compatible_args)
        }
        _ => Err(anyhow!(
            "Subcommand must be one of 'generate', 'check', 'codes', 'label', 'usage', 'compatible'"
        )),
    }
}

fn schema_args(args: &mut Arguments) -> Result<argsets::SchemaArgs> {
    Ok(argsets::SchemaArgs {
        schema: args.opt_value_from_str(ARG_SCHEMA)?,
    })
}

fn finish(args: Arguments) -> Result<()> {
    let unused = args.finish();
    if unused.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Unexpected arguments: {:?}", unused))
    }
}
