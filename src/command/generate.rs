use anyhow::Result;
use plugc::helpers::{self, base_path};
use plugc::render::Format;
use plugc::writer;

use super::load_artifacts;
use crate::argsets::GenerateArgs;

pub fn generate(args: GenerateArgs) -> Result<()> {
    let format: Format = args
        .format
        .unwrap_or_else(helpers::output_format)
        .parse()?;
    let out_dir = args.out_dir.unwrap_or_else(|| base_path::OUT_DIR.clone());

    let artifacts = load_artifacts(args.schema)?;
    // render everything before touching the output directory
    let files = format.renderer().render(&artifacts)?;
    let written = writer::write_all(&out_dir, &files)?;

    log::info!(
        "Generated {} {} files for {} types in {}",
        written.len(),
        format,
        artifacts.type_count,
        out_dir.display()
    );
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
