use anyhow::Result;

use super::load_artifacts;
use crate::argsets::SchemaArgs;

pub fn check(args: SchemaArgs) -> Result<()> {
    let artifacts = load_artifacts(args.schema)?;
    println!(
        "{} types, {} of {} type bits used, {} usages",
        artifacts.type_count,
        artifacts.used_bits,
        artifacts.type_bits,
        artifacts.usages.len()
    );
    Ok(())
}

pub fn codes(args: SchemaArgs) -> Result<()> {
    let artifacts = load_artifacts(args.schema)?;
    for constant in &artifacts.enumeration {
        println!("{} = {}", constant.name, constant.code);
    }
    Ok(())
}
