use anyhow::{anyhow, Result};

use super::{load_artifacts, resolve_code};
use crate::argsets::{CompatibleArgs, LabelArgs, UsageArgs};

pub fn label(args: LabelArgs) -> Result<()> {
    let artifacts = load_artifacts(args.schema)?;
    let code = resolve_code(&artifacts, &args.code)?;
    let label = artifacts
        .label(code)
        .ok_or_else(|| anyhow!("No plug type matches {code}"))?;
    println!("{label}");
    Ok(())
}

pub fn usage(args: UsageArgs) -> Result<()> {
    let artifacts = load_artifacts(args.schema)?;
    let code = resolve_code(&artifacts, &args.code)?;
    // the code's own CMD flag counts unless forced on the command line
    let is_command = args.command || code.is_command();
    println!("{}", artifacts.usage(code, is_command));
    Ok(())
}

pub fn compatible(args: CompatibleArgs) -> Result<()> {
    let artifacts = load_artifacts(args.schema)?;
    let dst = resolve_code(&artifacts, &args.dst)?;
    let src = resolve_code(&artifacts, &args.src)?;
    let verdict = artifacts.check_compatibility(dst, src);
    log::debug!("{dst} <- {src}: {:?}", verdict);
    if verdict.compatible {
        println!("compatible ({})", verdict.rule);
    } else {
        println!("incompatible ({})", verdict.rule);
    }
    Ok(())
}
